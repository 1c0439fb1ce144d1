pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;

pub mod mcp {
    pub mod catalog;
    pub mod protocol;
    pub mod server;
}

pub mod services {
    pub mod gateway;
    pub mod logger;
    pub mod policy;
    pub mod synthesizer;
    pub mod transport;
    pub mod validation;
}

pub mod utils {
    pub mod shell;
}
