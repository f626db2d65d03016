use crate::error::{FormulaError, Result};
use crate::postfix::Postfix;
use crate::stack::Stack;
use crate::token::Token;
use log::{debug, trace};
use std::collections::{BTreeSet, HashMap};

/// Reduces `postfix` to a single number with the given bindings.
///
/// Variables missing from `bindings` evaluate to `0.0`; keys in
/// `bindings` that the formula never mentions are ignored.
///
/// # Errors
///
/// [`FormulaError::StackUnderflow`] if an operator or function finds too few
/// operands, the formula is empty, or more than one value is left once every
/// token has been consumed.
pub fn evaluate(postfix: &Postfix, bindings: &HashMap<char, f64>) -> Result<f64> {
    let values = merge_bindings(postfix.variables(), bindings);
    let mut stack: Stack<f64> = Stack::with_capacity(postfix.tokens().len());

    for token in postfix.tokens() {
        match token {
            Token::Operator(op) => {
                let right = pop_value(&mut stack)?;
                let left = pop_value(&mut stack)?;
                stack.push(op.apply(left, right));
            }
            Token::Function(func) => {
                let argument = pop_value(&mut stack)?;
                stack.push(func.apply(argument));
            }
            Token::Variable(name) => {
                let value = values.get(name).copied().unwrap_or(0.0);
                trace!("Load {} = {}", name, value);
                stack.push(value);
            }
            Token::LeftParen | Token::RightParen => {
                debug!("Parenthesis in postfix form {}", postfix);
                return Err(FormulaError::StackUnderflow);
            }
        }
    }

    let result = pop_value(&mut stack)?;
    if !stack.is_empty() {
        debug!("{} values left after evaluating {}", stack.len() + 1, postfix);
        return Err(FormulaError::StackUnderflow);
    }
    debug!("Evaluated {} to {}", postfix, result);
    Ok(result)
}

fn pop_value(stack: &mut Stack<f64>) -> Result<f64> {
    stack.pop().ok_or(FormulaError::StackUnderflow)
}

/// Starts every known variable at `0.0` and overwrites the ones the caller
/// supplied. Unknown keys are skipped.
pub fn merge_bindings(
    variables: &BTreeSet<char>,
    supplied: &HashMap<char, f64>,
) -> HashMap<char, f64> {
    let mut values: HashMap<char, f64> = variables.iter().map(|&name| (name, 0.0)).collect();
    for (name, value) in supplied {
        if let Some(slot) = values.get_mut(name) {
            *slot = *value;
        } else {
            trace!("Ignoring binding for unknown variable '{}'", name);
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::postfix::to_postfix;

    fn postfix(input: &str) -> Postfix {
        let lexemes = Lexer::new(input).tokenize().unwrap();
        to_postfix(&lexemes).unwrap()
    }

    fn digits() -> HashMap<char, f64> {
        ('0'..='9').map(|d| (d, d.to_digit(10).unwrap() as f64)).collect()
    }

    fn evaluate_str(input: &str, bindings: &HashMap<char, f64>) -> Result<f64> {
        evaluate(&postfix(input), bindings)
    }

    #[test]
    fn test_simple_arithmetic() {
        assert_eq!(evaluate_str("2+3", &digits()), Ok(5.0));
        assert_eq!(evaluate_str("9-5", &digits()), Ok(4.0));
        assert_eq!(evaluate_str("6*7", &digits()), Ok(42.0));
        assert_eq!(evaluate_str("9/3", &digits()), Ok(3.0));
        assert_eq!(evaluate_str("2^5", &digits()), Ok(32.0));
    }

    #[test]
    fn test_precedence_and_grouping() {
        assert_eq!(evaluate_str("2+3*4", &digits()), Ok(14.0));
        assert_eq!(evaluate_str("(2+3)*4", &digits()), Ok(20.0));
        assert_eq!(evaluate_str("((8-2)*3)/(4+2)", &digits()), Ok(3.0));
    }

    #[test]
    fn test_left_associative() {
        assert_eq!(evaluate_str("8-3-2", &digits()), Ok(3.0));
        assert_eq!(evaluate_str("8/4/2", &digits()), Ok(1.0));
        assert_eq!(evaluate_str("2^3^2", &digits()), Ok(64.0));
    }

    #[test]
    fn test_trig_functions() {
        let bindings = HashMap::from([('x', 0.0)]);
        assert_eq!(evaluate_str("cos(x)", &bindings), Ok(1.0));
        assert_eq!(evaluate_str("sin(x)", &bindings), Ok(0.0));

        let bindings = HashMap::from([('x', std::f64::consts::FRAC_PI_2), ('2', 2.0)]);
        let value = evaluate_str("sin(x)*2", &bindings).unwrap();
        assert!((value - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_division_by_zero_is_ieee() {
        assert_eq!(evaluate_str("1/0", &digits()), Ok(f64::INFINITY));
        assert!(evaluate_str("0/0", &digits()).unwrap().is_nan());
    }

    #[test]
    fn test_unbound_variables_default_to_zero() {
        assert_eq!(evaluate_str("x+y", &HashMap::new()), Ok(0.0));
        assert_eq!(evaluate_str("cos(x)", &HashMap::new()), Ok(1.0));
    }

    #[test]
    fn test_unknown_bindings_ignored() {
        let bindings = HashMap::from([('x', 5.0), ('z', 99.0), ('1', 1.0)]);
        assert_eq!(evaluate_str("x+1", &bindings), Ok(6.0));
    }

    #[test]
    fn test_empty_formula_underflows() {
        assert_eq!(evaluate_str("", &HashMap::new()), Err(FormulaError::StackUnderflow));
        assert_eq!(evaluate_str("()", &HashMap::new()), Err(FormulaError::StackUnderflow));
    }

    #[test]
    fn test_missing_operand_underflows() {
        assert_eq!(evaluate_str("2+", &digits()), Err(FormulaError::StackUnderflow));
        assert_eq!(evaluate_str("*3", &digits()), Err(FormulaError::StackUnderflow));
        assert_eq!(evaluate_str("cosx", &HashMap::new()), Ok(1.0));
    }

    #[test]
    fn test_leftover_values_underflow() {
        assert_eq!(
            evaluate_str("ab", &HashMap::new()),
            Err(FormulaError::StackUnderflow)
        );
        assert_eq!(
            evaluate_str("a+cos", &HashMap::new()),
            Err(FormulaError::StackUnderflow)
        );
    }

    #[test]
    fn test_power_of_function_underflows() {
        assert_eq!(
            evaluate_str("2^cos(0)", &digits()),
            Err(FormulaError::StackUnderflow)
        );
        assert_eq!(evaluate_str("2^(cos(0))", &digits()), Ok(2.0));
    }

    #[test]
    fn test_same_postfix_after_error() {
        let broken = postfix("ab");
        assert!(evaluate(&broken, &HashMap::new()).is_err());
        assert!(evaluate(&broken, &HashMap::new()).is_err());
        assert_eq!(evaluate(&postfix("2*3"), &digits()), Ok(6.0));
    }

    #[test]
    fn test_parenthesis_in_postfix_is_rejected() {
        let malformed = Postfix::from_tokens(vec![
            Token::Variable('a'),
            Token::LeftParen,
            Token::Variable('b'),
            Token::Operator(crate::token::Operator::Add),
        ]);
        assert_eq!(
            evaluate(&malformed, &HashMap::new()),
            Err(FormulaError::StackUnderflow)
        );
    }

    #[test]
    fn test_merge_bindings() {
        let variables = BTreeSet::from(['x', 'y']);
        let merged = merge_bindings(&variables, &HashMap::from([('x', 2.5), ('q', 1.0)]));
        assert_eq!(merged, HashMap::from([('x', 2.5), ('y', 0.0)]));
    }
}
