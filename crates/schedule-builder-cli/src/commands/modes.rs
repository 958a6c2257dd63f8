use schedule_builder_core::SelectionMode;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    for mode in SelectionMode::ALL {
        println!("{:<12} {:<16} {}", mode.as_str(), mode.label(), mode.description());
    }
    Ok(())
}
