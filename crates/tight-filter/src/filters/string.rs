//! String filters.

use crate::error::FilterError;
use crate::types::{Arity, FilterCtx, FilterDefinition};
use crate::util;
use regex::{Captures, Regex};
use serde_json::Value;

fn upcase(_: &mut FilterCtx<'_>, value: Value, _: &[String]) -> Result<Value, FilterError> {
    Ok(Value::String(util::as_str(&value)?.to_uppercase()))
}

fn downcase(_: &mut FilterCtx<'_>, value: Value, _: &[String]) -> Result<Value, FilterError> {
    Ok(Value::String(util::as_str(&value)?.to_lowercase()))
}

/// Replace every match of the pattern `args[0]` with `args[1]`.
///
/// The replacement understands `$$`, `$&`, `` $` ``, `$'`, `$n`/`$nn` and
/// `$<name>`. A `$` that does not form one of those, including a reference
/// to a group the pattern does not have, is kept as written.
fn replace(_: &mut FilterCtx<'_>, value: Value, args: &[String]) -> Result<Value, FilterError> {
    let subject = util::as_str(&value)?;
    let pattern = Regex::new(&args[0]).map_err(|e| FilterError::Pattern(e.to_string()))?;
    let named = pattern.capture_names().flatten().next().is_some();
    let replacement = args[1].as_str();
    let out = pattern.replace_all(subject, |caps: &Captures<'_>| {
        let mut out = String::new();
        expand(caps, subject, replacement, named, &mut out);
        out
    });
    Ok(Value::String(out.into_owned()))
}

fn expand(caps: &Captures<'_>, subject: &str, replacement: &str, named: bool, out: &mut String) {
    let (start, end) = caps.get(0).map_or((0, 0), |m| (m.start(), m.end()));
    let mut rest = replacement;
    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos + 1..];
        let consumed = match tail.as_bytes().first() {
            Some(b'$') => {
                out.push('$');
                1
            }
            Some(b'&') => {
                out.push_str(&subject[start..end]);
                1
            }
            Some(b'`') => {
                out.push_str(&subject[..start]);
                1
            }
            Some(b'\'') => {
                out.push_str(&subject[end..]);
                1
            }
            Some(b) if b.is_ascii_digit() => match group_ref(tail, caps.len() - 1) {
                Some((group, len)) => {
                    out.push_str(caps.get(group).map_or("", |m| m.as_str()));
                    len
                }
                None => 0,
            },
            Some(b'<') if named => match tail.find('>') {
                Some(close) => {
                    out.push_str(caps.name(&tail[1..close]).map_or("", |m| m.as_str()));
                    close + 1
                }
                None => 0,
            },
            _ => 0,
        };
        if consumed == 0 {
            out.push('$');
        }
        rest = &tail[consumed..];
    }
    out.push_str(rest);
}

/// Group number and digit count for a `$n` or `$nn` reference. Two digits
/// win when that group exists.
fn group_ref(tail: &str, groups: usize) -> Option<(usize, usize)> {
    let digits: Vec<usize> = tail
        .bytes()
        .take(2)
        .take_while(u8::is_ascii_digit)
        .map(|b| usize::from(b - b'0'))
        .collect();
    if let &[tens, ones] = digits.as_slice() {
        let n = tens * 10 + ones;
        if (1..=groups).contains(&n) {
            return Some((n, 2));
        }
    }
    let n = *digits.first()?;
    (1..=groups).contains(&n).then_some((n, 1))
}

/// Replace the first literal occurrence of `args[0]` with `args[1]`.
fn replace_first(
    _: &mut FilterCtx<'_>,
    value: Value,
    args: &[String],
) -> Result<Value, FilterError> {
    let subject = util::as_str(&value)?;
    Ok(Value::String(subject.replacen(args[0].as_str(), &args[1], 1)))
}

fn split(_: &mut FilterCtx<'_>, value: Value, args: &[String]) -> Result<Value, FilterError> {
    let subject = util::as_str(&value)?;
    let delimiter = args[0].as_str();
    let parts: Vec<Value> = if delimiter.is_empty() {
        subject.chars().map(|c| Value::String(c.to_string())).collect()
    } else {
        subject
            .split(delimiter)
            .map(|s| Value::String(s.to_string()))
            .collect()
    };
    Ok(Value::Array(parts))
}

pub fn filters() -> Vec<FilterDefinition> {
    vec![
        FilterDefinition::new("upcase", Arity::Fixed(0), upcase),
        FilterDefinition::new("downcase", Arity::Fixed(0), downcase),
        FilterDefinition::new("replace", Arity::Fixed(2), replace),
        FilterDefinition::new("replaceFirst", Arity::Fixed(2), replace_first),
        FilterDefinition::new("split", Arity::Fixed(1), split),
    ]
}
