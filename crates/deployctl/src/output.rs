use serde::Serialize;

use crate::error::Result;

#[derive(Debug, Clone, Copy, clap::ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    /// Render `data` in this format
    pub fn render<T: Serialize>(self, data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        Ok(match self {
            OutputFormat::Json => serde_json::to_string_pretty(&value)?,
            OutputFormat::Yaml => serde_yaml::to_string(&value)?,
        })
    }
}

pub fn print_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<()> {
    let rendered = format.render(data)?;
    println!("{}", rendered.trim_end());
    Ok(())
}
