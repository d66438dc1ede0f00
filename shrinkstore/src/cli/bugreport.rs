use bugreport::{
    bugreport,
    collector::{CompileTimeInformation, EnvironmentVariables, OperatingSystem, SoftwareVersion},
    format::Markdown,
};

pub fn run() {
    bugreport!()
        .info(SoftwareVersion::default())
        .info(OperatingSystem::default())
        .info(EnvironmentVariables::list(&[
            "SHELL",
            "TERM",
            "RUST_LOG",
            "SHRINKSTORE_PORT",
            "SHRINKSTORE_DATA_DIR",
            "SHRINKSTORE_DATA_FILE",
        ]))
        .info(CompileTimeInformation::default())
        .print::<Markdown>();
}
