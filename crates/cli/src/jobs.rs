//! The two jobs the helper knows how to run

use crate::config::Config;
use runner::{JobMessages, JobRunner};
use std::sync::Arc;

pub const GENERATE_SUCCESS: &str = "Archivos HTML actualizados con éxito.";
pub const GENERATE_FAILURE: &str = "Error al generar HTML";
pub const INITIALIZE_SUCCESS: &str =
    "Proyecto inicializado correctamente respetando los días existentes.";
pub const INITIALIZE_FAILURE: &str = "Error al inicializar el proyecto";

/// Shared handles to both jobs
#[derive(Clone)]
pub struct Jobs {
    pub generate: Arc<JobRunner>,
    pub initialize: Arc<JobRunner>,
}

impl Jobs {
    pub fn from_config(config: &Config) -> Self {
        Self {
            generate: Arc::new(JobRunner::new(
                "generate",
                config.generate.to_command(),
                JobMessages::new(GENERATE_SUCCESS, GENERATE_FAILURE),
            )),
            initialize: Arc::new(JobRunner::new(
                "initialize",
                config.initialize.to_command(),
                JobMessages::new(INITIALIZE_SUCCESS, INITIALIZE_FAILURE),
            )),
        }
    }
}
