// Adapters layer: HTTP clients for the two remote services and the terminal presenter.

pub mod explainer;
pub mod scoring;
pub mod terminal;
