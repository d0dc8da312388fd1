use anyhow::Result;
use comfy_table::{Cell, Table};
use stepflow_ai::{ToolCatalog, ToolParameter};

use crate::config::CliConfig;
use crate::demo_tools::demo_toolset;
use crate::output::{OutputFormat, print_json, print_table};

pub fn run(config: &CliConfig, format: OutputFormat) -> Result<()> {
    let catalog = ToolCatalog::new(demo_toolset(), &config.engine);
    let tools = catalog.list_available();

    if format.is_json() {
        return print_json(&tools);
    }

    let mut table = Table::new();
    table.set_header(vec!["Tool", "Description", "Parameters"]);

    for tool in &tools {
        table.add_row(vec![
            Cell::new(tool.qualified_name()),
            Cell::new(&tool.description),
            Cell::new(format_parameters(&tool.parameters)),
        ]);
    }

    print_table(&table);
    Ok(())
}

fn format_parameters(parameters: &[ToolParameter]) -> String {
    parameters
        .iter()
        .map(|parameter| match &parameter.default_value {
            Some(default) => format!("{}={default}", parameter.name),
            None => parameter.name.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}
