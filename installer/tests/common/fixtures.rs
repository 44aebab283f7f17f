//! Test fixtures for installer tests

pub struct TestFixtures;

impl TestFixtures {
    pub const DOCKER_VERSION: &'static str = "Docker version 27.3.1, build ce12230\n";
    pub const COMPOSE_VERSION: &'static str = "Docker Compose version v2.29.7-desktop.1\n";
    pub const PYTHON_VERSION: &'static str = "Python 3.12.4\n";

    pub const PS_RUNNING: &'static str =
        r#"{"Name":"homehub","Service":"homehub","State":"running","Status":"Up 4 seconds"}"#;
    pub const PS_EXITED: &'static str =
        r#"{"Name":"homehub","Service":"homehub","State":"exited","Status":"Exited (1) 1 second ago"}"#;

    pub const EXISTING_CONFIG: &'static str = "instance_name: The Smiths\npassword: hunter2\n";

    pub const COMPOSE_FILE: &'static str = "services:\n  homehub:\n    image: homehub/homehub:latest\n    ports:\n      - \"5000:5000\"\n";
    pub const PACKAGE_JSON: &'static str = r#"{"name":"homehub","scripts":{"build:css":"tailwindcss -o static/css/output.css"}}"#;

    pub const DATA_DIRS: [&'static str; 4] = ["data", "data/uploads", "data/backups", "logs"];
}
