use formula_rs::Formula;
use log::debug;
use std::collections::HashMap;

fn main() {
    pretty_env_logger::init();

    let infix = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "(a+b)*cos(x)-c/d".to_string());

    let formula = match Formula::new(infix.as_str()) {
        Ok(formula) => formula,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    };

    println!("Infix:     {}", formula.infix());
    println!("Postfix:   {}", formula.postfix());
    println!("Variables: {:?}", formula.variables());

    let bindings: HashMap<char, f64> = formula
        .variables()
        .into_iter()
        .enumerate()
        .map(|(i, name)| (name, (i + 1) as f64))
        .collect();
    debug!("Bindings: {:?}", bindings);

    match formula.evaluate(&bindings) {
        Ok(result) => println!("Result:    {}", result),
        Err(err) => println!("Error:     {}", err),
    }
}
