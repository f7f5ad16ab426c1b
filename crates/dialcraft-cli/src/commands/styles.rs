//! List the registered terminal styles.

use std::error::Error;

use dialcraft_core::StyleDescriptor;

pub fn run(json: bool) -> Result<(), Box<dyn Error>> {
    let registry = super::build_registry()?;
    let descriptors: Vec<StyleDescriptor> = registry.descriptors().cloned().collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&descriptors)?);
    } else {
        for d in &descriptors {
            let note = if d.show_label_inside_dial {
                "  (label inside dial)"
            } else {
                ""
            };
            println!("{:<10} {}{note}", d.id, d.label);
        }
    }
    Ok(())
}
