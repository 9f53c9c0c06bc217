//! Schema command - print the expected structured input format

use crate::profile::AnalysisInput;
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let schema = schema_for!(AnalysisInput);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }
}
