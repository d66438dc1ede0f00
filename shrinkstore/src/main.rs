use clap::{arg, command, crate_name, Command};
use client::UploadParams;

mod cli;

#[tokio::main]
async fn main() {
    let cli = command!(crate_name!())
        .version(clap::crate_version!())
        .about(clap::crate_description!())
        .subcommand(Command::new(cli::VERSION_SUBCOMMAND).about(cli::VERSION_DESCRIPTION))
        .subcommand(Command::new(cli::BUGREPORT_SUBCOMMAND).about(cli::BUGREPORT_DESCRIPTION))
        .subcommand(Command::new(cli::SERVER_SUBCOMMAND).about(cli::SERVER_DESCRIPTION))
        .subcommand(
            Command::new(cli::INSERT_SUBCOMMAND)
                .about(cli::INSERT_DESCRIPTION)
                .arg(arg!(-u --uri <URI>).required(true).help("Shrinkstore URI"))
                .arg(
                    arg!(-f --file <FILE>)
                        .required(true)
                        .help("Path to file to insert"),
                )
                .arg(
                    arg!(-s --session <SESSION>)
                        .required(true)
                        .help("Session to insert the file into"),
                )
                .arg(
                    arg!(-t --"type" <MEDIA_TYPE>)
                        .required(false)
                        .help("Declared media type of the file"),
                ),
        )
        .subcommand(
            Command::new(cli::LIST_SUBCOMMAND)
                .about(cli::LIST_DESCRIPTION)
                .arg(arg!(-u --uri <URI>).required(true).help("Shrinkstore URI"))
                .subcommand(
                    Command::new(cli::SESSION_SUBCOMMAND).about(cli::SESSION_LIST_DESCRIPTION),
                )
                .subcommand(
                    Command::new(cli::FILE_SUBCOMMAND)
                        .about(cli::FILE_LIST_DESCRIPTION)
                        .arg(
                            arg!(-s --session <SESSION>)
                                .required(true)
                                .help("Session to list"),
                        ),
                ),
        )
        .subcommand(
            Command::new(cli::STATS_SUBCOMMAND)
                .about(cli::STATS_DESCRIPTION)
                .arg(arg!(-u --uri <URI>).required(true).help("Shrinkstore URI"))
                .arg(
                    arg!(-s --session <SESSION>)
                        .required(true)
                        .help("Session to aggregate"),
                ),
        )
        .subcommand(
            Command::new(cli::GET_SUBCOMMAND)
                .about(cli::GET_DESCRIPTION)
                .arg(arg!(-u --uri <URI>).required(true).help("Shrinkstore URI"))
                .arg(arg!(-i --id <ID>).required(true).help("Stored file id"))
                .arg(
                    arg!(-o --output <OUTPUT>)
                        .required(true)
                        .help("Path to write the downloaded file to"),
                ),
        )
        .subcommand(
            Command::new(cli::DELETE_SUBCOMMAND)
                .about(cli::DELETE_DESCRIPTION)
                .arg(arg!(-u --uri <URI>).required(true).help("Shrinkstore URI"))
                .arg(arg!(-i --id <ID>).required(true).help("Stored file id")),
        )
        .arg_required_else_help(true)
        .disable_version_flag(true)
        .get_matches();

    if cli.subcommand_matches(cli::VERSION_SUBCOMMAND).is_some() {
        cli::version::run();
    } else if cli.subcommand_matches(cli::BUGREPORT_SUBCOMMAND).is_some() {
        cli::bugreport::run();
    } else if cli.subcommand_matches(cli::SERVER_SUBCOMMAND).is_some() {
        cli::server::run().await;
    } else if let Some(insert_matches) = cli.subcommand_matches(cli::INSERT_SUBCOMMAND) {
        let uri = insert_matches.get_one::<String>("uri").unwrap();
        let file = insert_matches.get_one::<String>("file").unwrap();
        let session = insert_matches.get_one::<String>("session").unwrap();
        let media_type = insert_matches
            .get_one::<String>("type")
            .cloned()
            .unwrap_or_default();
        let params = UploadParams {
            uri: uri.clone(),
            file: file.clone(),
            session: session.clone(),
            media_type,
        };
        cli::client::insert_single_file(params).await;
    } else if let Some(list_matches) = cli.subcommand_matches(cli::LIST_SUBCOMMAND) {
        let uri = list_matches.get_one::<String>("uri").unwrap();
        if list_matches
            .subcommand_matches(cli::SESSION_SUBCOMMAND)
            .is_some()
        {
            cli::client::list_sessions(uri).await;
        } else if let Some(file_matches) = list_matches.subcommand_matches(cli::FILE_SUBCOMMAND) {
            let session = file_matches.get_one::<String>("session").unwrap();
            cli::client::list_session_files(uri, session).await;
        }
    } else if let Some(stats_matches) = cli.subcommand_matches(cli::STATS_SUBCOMMAND) {
        let uri = stats_matches.get_one::<String>("uri").unwrap();
        let session = stats_matches.get_one::<String>("session").unwrap();
        cli::client::show_stats(uri, session).await;
    } else if let Some(get_matches) = cli.subcommand_matches(cli::GET_SUBCOMMAND) {
        let uri = get_matches.get_one::<String>("uri").unwrap();
        let id = get_matches.get_one::<String>("id").unwrap();
        let output = get_matches.get_one::<String>("output").unwrap();
        cli::client::download_file(uri, id, output).await;
    } else if let Some(delete_matches) = cli.subcommand_matches(cli::DELETE_SUBCOMMAND) {
        let uri = delete_matches.get_one::<String>("uri").unwrap();
        let id = delete_matches.get_one::<String>("id").unwrap();
        cli::client::delete_file(uri, id).await;
    }
}
