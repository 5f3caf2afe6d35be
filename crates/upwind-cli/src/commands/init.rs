//! The `upwind init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create upwind.toml
    if std::path::Path::new("upwind.toml").exists() {
        println!("upwind.toml already exists, skipping.");
    } else {
        std::fs::write("upwind.toml", SAMPLE_CONFIG)?;
        println!("Created upwind.toml");
    }

    // Create example bank
    std::fs::create_dir_all("banks")?;
    let example_path = std::path::Path::new("banks/example.toml");
    if example_path.exists() {
        println!("banks/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_BANK)?;
        println!("Created banks/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Add your own questions to banks/example.toml");
    println!("  2. Run: upwind validate --bank banks/example.toml");
    println!("  3. Run: upwind quiz --bank banks/example.toml --count 2");
    println!("  Or take the built-in Part 103 quiz: upwind quiz");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# upwind configuration

# Questions per quiz
question_count = 20

# Use a custom bank file or directory instead of the built-in one
# bank = "banks"

# Fixed seed for repeatable quizzes
# seed = 42

# Restrict quizzes to these topics
# topics = ["Airspace for Ultralights", "Emergency Procedures"]
"#;

const EXAMPLE_BANK: &str = r#"[bank]
id = "example"
name = "Example Question Bank"
description = "A small example bank to get started"

[[categories]]
name = "Regulations & Rules"
topics = ["FAR Part 103 Overview"]

[[questions]]
topic = "FAR Part 103 Overview"
prompt = "What is the maximum empty weight for a powered ultralight vehicle according to FAR Part 103?"
options = ["155 pounds", "254 pounds", "300 pounds", "500 pounds"]
correct_answer = "254 pounds"
explanation = "FAR Part 103.1(e)(1) states a powered ultralight must weigh less than 254 pounds empty weight, excluding floats and safety devices."

[[questions]]
topic = "FAR Part 103 Overview"
prompt = "What is the maximum fuel capacity for a powered ultralight?"
options = ["5 U.S. gallons", "10 U.S. gallons", "3 U.S. gallons", "There is no limit"]
correct_answer = "5 U.S. gallons"
explanation = "FAR Part 103.1(e)(2) limits the fuel capacity of a powered ultralight to a maximum of 5 U.S. gallons."

[[questions]]
topic = "FAR Part 103 Overview"
prompt = "Is a pilot certificate required to operate a legal Part 103 ultralight?"
options = ["Yes, a Sport Pilot certificate is required.", "Yes, at least a Student Pilot certificate.", "No, no pilot or medical certificate is required.", "Only if flying near an airport."]
correct_answer = "No, no pilot or medical certificate is required."
explanation = "FAR Part 103 does not require the operator of an ultralight vehicle to hold any airman or medical certificate."
"#;
