//! This module parses line-oriented rule text into validated transition rules.
//! Each significant line is `CURRENT_STATE CURRENT_SYMBOL NEXT_STATE NEXT_SYMBOL DIRECTION`,
//! fields separated by runs of whitespace, with `//` comments running to end-of-line.

use crate::config::MachineConfig;
use crate::types::{Direction, MachineError, TransitionRule};

/// Parses rule text into an ordered sequence of validated transition rules.
///
/// Per line: trim whitespace, skip empty lines and lines starting with the comment
/// prefix, strip any trailing inline comment, then split on whitespace. Source order
/// is preserved for diagnostics and export; execution semantics do not depend on it.
///
/// # Errors
///
/// * `MalformedRule` if a significant line does not yield exactly 5 tokens.
/// * `InvalidDirection` if the 5th token is not the configured left or right symbol.
/// * `InvalidSymbolLength` if a symbol token is not exactly one character.
/// * `InvalidStateLength` if a state label exceeds the configured length bound.
/// * `EmptyRuleSet` if no valid rule lines were found.
/// * `TooManyRules` if the rule count exceeds the configured ceiling.
pub fn parse(text: &str, config: &MachineConfig) -> Result<Vec<TransitionRule>, MachineError> {
    let mut rules = Vec::new();

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with(&config.comment_prefix) {
            continue;
        }

        // Strip trailing inline comment
        let line = match line.find(&config.comment_prefix) {
            Some(idx) => line[..idx].trim(),
            None => line,
        };

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != 5 {
            return Err(MachineError::MalformedRule {
                line: line.to_string(),
                count: tokens.len(),
            });
        }

        rules.push(parse_rule(line, &tokens, config)?);
    }

    if rules.is_empty() {
        return Err(MachineError::EmptyRuleSet);
    }

    if rules.len() > config.max_rules {
        return Err(MachineError::TooManyRules {
            count: rules.len(),
            max: config.max_rules,
        });
    }

    Ok(rules)
}

/// Validates the 5 tokens of a single rule line.
fn parse_rule(
    line: &str,
    tokens: &[&str],
    config: &MachineConfig,
) -> Result<TransitionRule, MachineError> {
    let direction = parse_direction(line, tokens[4], config)?;
    let read = parse_symbol(line, tokens[1])?;
    let write = parse_symbol(line, tokens[3])?;
    let state = parse_state(tokens[0], config)?;
    let next_state = parse_state(tokens[2], config)?;

    Ok(TransitionRule {
        state,
        read,
        next_state,
        write,
        direction,
    })
}

fn parse_direction(
    line: &str,
    token: &str,
    config: &MachineConfig,
) -> Result<Direction, MachineError> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c == config.left => Ok(Direction::Left),
        (Some(c), None) if c == config.right => Ok(Direction::Right),
        _ => Err(MachineError::InvalidDirection {
            line: line.to_string(),
            token: token.to_string(),
        }),
    }
}

fn parse_symbol(line: &str, token: &str) -> Result<char, MachineError> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(MachineError::InvalidSymbolLength {
            line: line.to_string(),
            token: token.to_string(),
        }),
    }
}

fn parse_state(token: &str, config: &MachineConfig) -> Result<String, MachineError> {
    let len = token.chars().count();
    if len > config.max_state_len {
        return Err(MachineError::InvalidStateLength {
            state: token.to_string(),
            len,
            max: config.max_state_len,
        });
    }
    Ok(token.to_string())
}
