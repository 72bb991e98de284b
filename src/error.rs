use thiserror::Error;

use crate::surface::NodeId;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("drawing surface is not initialized; call `update_config` first")]
    SurfaceNotInitialized,

    #[error("chart was destroyed")]
    Destroyed,

    #[error("stale node handle: {id:?} is no longer attached")]
    StaleNode { id: NodeId },

    #[error("the host root element cannot be removed")]
    RootRemoval,

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
