pub mod project;
pub mod settings;
pub mod validation;

pub use project::{
    Category, FundingModelElement, LegalEntityType, ProjectBase, Stage,
};
pub use settings::{ProjectSettings, UserDescriptor};
