use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Game not running yet. Have you forgotten to run \"game.start()\"?")]
    NotRunning,

    #[error("Game already running.")]
    AlreadyRunning,

    #[error("Unrecoverable error: Unknown terrain type \"{0}\".")]
    UnknownTerrainType(String),

    #[error("Unrecoverable error: unsupported action \"{0}\".")]
    UnsupportedAction(String),

    #[error("Unrecoverable error: unsupported alteration condition \"{0}\".")]
    UnsupportedCondition(String),

    #[error("Unrecoverable error: could not alter property \"{0}\".")]
    UnsupportedProperty(String),

    #[error("Unrecoverable error: unsupported operator \"{0}\".")]
    UnsupportedOperator(String),

    #[error("Unrecoverable error: unsupported resource \"{0}\".")]
    UnsupportedResource(String),

    #[error("Unrecoverable error: {0}")]
    UnsupportedEffect(String),

    #[error("Exactly one village tile is required, found {0}.")]
    VillageCount(usize),

    #[error("Cannot draw terrain: the terrain deck is empty.")]
    EmptyTerrainDeck,

    #[error("Cannot draw a daily event: no event is available even after refilling the deck.")]
    EmptyEventDeck,

    #[error("Random slot \"{slot}\" produced {value}, outside of [{min}, {max}).")]
    RandomOutOfRange {
        slot: String,
        value: usize,
        min: usize,
        max: usize,
    },

    #[error("Invalid daily event deck: {0}")]
    InvalidEventDeck(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("Asset preload failed: {0}")]
    AssetPreload(String),

    #[error("Asset preload timed out after {0} ms")]
    PreloadTimeout(u64),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
