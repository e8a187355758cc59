// Domain layer: form values, prediction outcomes and the ports the pipeline talks to.

pub mod form;
pub mod model;
pub mod ports;
