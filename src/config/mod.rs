pub mod settings;

pub use settings::{
    ApiSettings, AppSettings, CampaignSettings, InputSettings, ProjectionSettings,
    SensitivitySettings, Settings,
};
