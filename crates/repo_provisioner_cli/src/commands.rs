//! Command modules for the Repo Provisioner CLI.
//!
//! - `provision_cmd`: validates the inputs and runs the provisioning sequence

pub mod provision_cmd;
