use client::UploadParams;

pub async fn insert_single_file(params: UploadParams) {
    client::upload_file(params).await;
}

pub async fn list_sessions(uri: &str) {
    client::list_sessions(uri).await;
}

pub async fn list_session_files(uri: &str, session: &str) {
    client::list_files(uri, session).await;
}

pub async fn show_stats(uri: &str, session: &str) {
    client::show_stats(uri, session).await;
}

pub async fn download_file(uri: &str, id: &str, output: &str) {
    client::download_file(uri, id, output).await;
}

pub async fn delete_file(uri: &str, id: &str) {
    client::delete_file(uri, id).await;
}
