use crate::output::{print_json, print_table};
use wasend_core::types::Category;

pub fn run(json: bool) -> anyhow::Result<()> {
    if json {
        let value: Vec<_> = Category::all()
            .iter()
            .map(|c| serde_json::json!({ "name": c.as_str(), "label": c.label() }))
            .collect();
        print_json(&value)?;
        return Ok(());
    }

    let rows = Category::all()
        .iter()
        .map(|c| vec![c.as_str().to_string(), c.label().to_string()])
        .collect();
    print_table(&["NAME", "LABEL"], rows);
    Ok(())
}
