use std::path::PathBuf;

use comfy_table::{presets::UTF8_HORIZONTAL_ONLY, Attribute, Cell, ContentArrangement, Table};
use kernel::{format_file_size, DeleteResult, ProcessedFile, RegistryStats, Session};
use reqwest::Client;
use resource::Resource;

pub mod resource;

pub struct UploadParams {
    pub uri: String,
    pub file: String,
    pub session: String,
    pub media_type: String,
}

/// Uploads a local file to a session. The server reduces it and answers with
/// the stored record id.
pub async fn upload_file(params: UploadParams) {
    let path = PathBuf::from(&params.file);
    let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
        println!("invalid file path {}", &params.file);
        return;
    };

    let Some(mut resource) = Resource::new(&params.uri) else {
        println!("invalid server uri {}", &params.uri);
        return;
    };
    resource
        .append_path("api")
        .append_path(&params.session)
        .append_path(file_name);

    let bytes = match tokio::fs::read(&path).await {
        Ok(b) => b,
        Err(e) => {
            println!("no such file {}: {e}", &params.file);
            return;
        }
    };

    let client = Client::new();
    let result = client
        .post(resource.to_string())
        .header("content-type", params.media_type)
        .body(bytes)
        .send()
        .await;
    match result {
        Ok(x) => {
            let status = x.status();
            match x.json::<String>().await {
                Ok(id) => println!("file {} inserted. Status: {status} Id: {id}", params.file),
                Err(_) => println!("file {} not inserted. Status: {status}", params.file),
            }
        }
        Err(e) => {
            println!("upload error: {e}");
        }
    }
}

/// Lists all sessions on the server as a table.
pub async fn list_sessions(uri: &str) {
    let Some(mut resource) = Resource::new(uri) else {
        println!("invalid server uri {uri}");
        return;
    };
    resource.append_path("api/");

    let client = Client::new();

    match client.get(resource.to_string()).send().await {
        Ok(response) => match response.json::<Vec<Session>>().await {
            Ok(sessions) => {
                let mut table = new_table(vec!["Session", "Files count"]);
                for s in sessions {
                    table.add_row(vec![Cell::new(s.id), Cell::new(s.files_count)]);
                }
                println!("{table}");
            }
            Err(e) => println!("JSON decode error: {e}"),
        },
        Err(e) => {
            println!("error: {e}");
        }
    }
}

/// Lists all files of a session as a table, newest first.
pub async fn list_files(uri: &str, session: &str) {
    let Some(mut resource) = Resource::new(uri) else {
        println!("invalid server uri {uri}");
        return;
    };
    resource.append_path("api").append_path(session);

    let client = Client::new();

    match client.get(resource.to_string()).send().await {
        Ok(response) => match response.json::<Vec<ProcessedFile>>().await {
            Ok(files) => {
                let mut table = new_table(vec![
                    "Id", "Name", "Type", "Original", "Compressed", "Saved", "Created",
                ]);
                for f in files {
                    table.add_row(vec![
                        Cell::new(&f.id),
                        Cell::new(&f.name),
                        Cell::new(&f.file_type),
                        Cell::new(format_file_size(f.original_size)),
                        Cell::new(format_file_size(f.compressed_size)),
                        Cell::new(format!("{:.1}%", f.compression_ratio)),
                        Cell::new(f.created_at.to_rfc3339()),
                    ]);
                }
                println!("{table}");
            }
            Err(e) => println!("JSON decode error: {e}"),
        },
        Err(e) => {
            println!("error: {e}");
        }
    }
}

/// Shows aggregate statistics of a session.
pub async fn show_stats(uri: &str, session: &str) {
    let Some(mut resource) = Resource::new(uri) else {
        println!("invalid server uri {uri}");
        return;
    };
    resource
        .append_path("api")
        .append_path(session)
        .append_path("stats");

    let client = Client::new();

    match client.get(resource.to_string()).send().await {
        Ok(response) => match response.json::<RegistryStats>().await {
            Ok(stats) => {
                let mut table = new_table(vec!["Metric", "Value"]);
                table.add_row(vec![Cell::new("Files stored"), Cell::new(stats.count)]);
                table.add_row(vec![
                    Cell::new("Original size"),
                    Cell::new(format_file_size(stats.total_original_bytes)),
                ]);
                table.add_row(vec![
                    Cell::new("Compressed size"),
                    Cell::new(format_file_size(stats.total_compressed_bytes)),
                ]);
                table.add_row(vec![
                    Cell::new("Space saved"),
                    Cell::new(format!("{} ({}%)", stats.saved_bytes, stats.percent_saved)),
                ]);
                println!("{table}");
            }
            Err(e) => println!("JSON decode error: {e}"),
        },
        Err(e) => {
            println!("error: {e}");
        }
    }
}

/// Downloads a stored file by id into a local file.
pub async fn download_file(uri: &str, id: &str, output: &str) {
    let Some(mut resource) = Resource::new(uri) else {
        println!("invalid server uri {uri}");
        return;
    };
    resource.append_path("api/file").append_path(id);

    let client = Client::new();

    match client.get(resource.to_string()).send().await {
        Ok(response) => {
            if !response.status().is_success() {
                println!("file {id} not downloaded. Status: {}", response.status());
                return;
            }
            match response.bytes().await {
                Ok(bytes) => match tokio::fs::write(output, &bytes).await {
                    Ok(()) => println!("file {id} written to {output} ({} bytes)", bytes.len()),
                    Err(e) => println!("cannot write {output}: {e}"),
                },
                Err(e) => println!("download error: {e}"),
            }
        }
        Err(e) => {
            println!("error: {e}");
        }
    }
}

/// Deletes a stored file by id.
pub async fn delete_file(uri: &str, id: &str) {
    let Some(mut resource) = Resource::new(uri) else {
        println!("invalid server uri {uri}");
        return;
    };
    resource.append_path("api/file").append_path(id);

    let client = Client::new();

    match client.delete(resource.to_string()).send().await {
        Ok(response) => {
            let status = response.status();
            match response.json::<DeleteResult>().await {
                Ok(r) => println!("files removed: {}. Status: {status}", r.files),
                Err(e) => println!("JSON decode error: {e}"),
            }
        }
        Err(e) => {
            println!("error: {e}");
        }
    }
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_HORIZONTAL_ONLY)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120)
        .set_header(
            header
                .into_iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
                .collect::<Vec<Cell>>(),
        );
    table
}
