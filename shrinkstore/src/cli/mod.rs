pub mod bugreport;
pub mod client;
pub mod server;
pub mod version;

pub const SERVER_SUBCOMMAND: &str = "server";
pub const SERVER_DESCRIPTION: &str = "Run the server";

pub const VERSION_SUBCOMMAND: &str = "version";
pub const VERSION_DESCRIPTION: &str = "Display the version and build information";

pub const BUGREPORT_SUBCOMMAND: &str = "bugreport";
pub const BUGREPORT_DESCRIPTION: &str = "Collect information for a bug report";

pub const INSERT_SUBCOMMAND: &str = "insert";
pub const INSERT_DESCRIPTION: &str = "Reduce a local file and insert it into the store";

pub const LIST_SUBCOMMAND: &str = "list";
pub const LIST_DESCRIPTION: &str = "List sessions or session files";

pub const SESSION_SUBCOMMAND: &str = "session";
pub const SESSION_LIST_DESCRIPTION: &str = "List all sessions";

pub const FILE_SUBCOMMAND: &str = "file";
pub const FILE_LIST_DESCRIPTION: &str = "List all files of a session";

pub const STATS_SUBCOMMAND: &str = "stats";
pub const STATS_DESCRIPTION: &str = "Show aggregate statistics of a session";

pub const GET_SUBCOMMAND: &str = "get";
pub const GET_DESCRIPTION: &str = "Download a stored file by id";

pub const DELETE_SUBCOMMAND: &str = "delete";
pub const DELETE_DESCRIPTION: &str = "Delete a stored file by id";
