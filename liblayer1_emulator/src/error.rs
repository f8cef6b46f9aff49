use std::path::PathBuf;
use thiserror::Error;

use super::constants::*;

#[derive(Debug, Clone, Error)]
pub enum AddressError {
    #[error("Tower coordinate (ieta: {ieta}, iphi: {iphi}) maps outside the link grid -- link: {link}, slot: {slot}, subtower: {subtower}; expected link < {max_link}, slot < {max_slot}", max_link=NUM_LINKS, max_slot=TOWERS_PER_LINK)]
    OutOfRange {
        ieta: i16,
        iphi: u16,
        link: i32,
        slot: i32,
        subtower: i32,
    },
}

#[derive(Debug, Error)]
pub enum LinksError {
    #[error("Layer1Links failed to address a tower: {0}")]
    BadAddress(#[from] AddressError),
    #[error("Layer1Links failed to write a link dump: {0}")]
    IOError(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum EventFileError {
    #[error("Could not open event file because file {0:?} does not exist")]
    BadFilePath(PathBuf),
    #[error("Event file failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Event file failed to parse YAML: {0}")]
    ParsingError(#[from] serde_yaml::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration as file {0:?} does not exist")]
    BadFilePath(PathBuf),
    #[error("Config failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Config failed to parse YAML: {0}")]
    ParsingError(#[from] serde_yaml::Error),
}

#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("Processor failed due to event file error: {0}")]
    EventError(#[from] EventFileError),
    #[error("Processor failed due to Layer1Links error: {0}")]
    LinksError(#[from] LinksError),
    #[error("Processor failed due to Config error: {0}")]
    ConfigError(#[from] ConfigError),
    #[error("Processor failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
}
