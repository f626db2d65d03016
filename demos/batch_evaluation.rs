use formula_rs::FormulaCache;
use std::collections::HashMap;

fn main() {
    pretty_env_logger::init();

    let binding_sets = vec![
        HashMap::from([('p', 120.0), ('v', 3000.0), ('k', 0.5)]),
        HashMap::from([('p', 80.0), ('v', 6000.0), ('k', 0.25)]),
        HashMap::from([('p', 95.5), ('v', 4200.0), ('k', 1.0)]),
    ];

    let mut cache = FormulaCache::default();
    for infix in ["p*v-k", "sin(k)*p+v/p", "p*v-k"] {
        let formula = match cache.get_or_compile(infix) {
            Ok(formula) => formula,
            Err(err) => {
                println!("{}: {}", infix, err);
                continue;
            }
        };

        for (i, result) in formula.evaluate_batch(&binding_sets).iter().enumerate() {
            println!("{} [{}] = {:?}", formula, i, result);
        }
    }
    println!("Cached formulas: {}", cache.len());
}
