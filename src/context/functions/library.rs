//! Built-in functions.

use std::fmt::Write as _;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::format::{Item, StrftimeItems};
use rand::Rng;
use regex::Regex;
use uuid::Uuid;

use super::FunctionLibrary;
use crate::context::TestContext;
use crate::context::error::{ContextError, ContextResult};

const DEFAULT_DATE_FORMAT: &str = "%d.%m.%Y";

/// Builds the default library under the given call prefix.
#[must_use]
pub fn default_library(prefix: &str) -> FunctionLibrary {
    FunctionLibrary::new("caliper", prefix)
        .with_function("concat", concat)
        .with_function("upperCase", upper_case)
        .with_function("lowerCase", lower_case)
        .with_function("substring", substring)
        .with_function("stringLength", string_length)
        .with_function("translate", translate)
        .with_function("randomNumber", random_number)
        .with_function("randomString", random_string)
        .with_function("randomUUID", random_uuid)
        .with_function("currentDate", current_date)
        .with_function("sum", sum)
        .with_function("abs", abs)
        .with_function("max", max)
        .with_function("min", min)
        .with_function("floor", floor)
        .with_function("ceiling", ceiling)
        .with_function("escapeXml", escape_xml)
        .with_function("encodeBase64", encode_base64)
        .with_function("decodeBase64", decode_base64)
}

fn concat(params: &[String], _: &TestContext) -> ContextResult<String> {
    Ok(params.concat())
}

fn upper_case(params: &[String], _: &TestContext) -> ContextResult<String> {
    Ok(single("upperCase", params)?.to_uppercase())
}

fn lower_case(params: &[String], _: &TestContext) -> ContextResult<String> {
    Ok(single("lowerCase", params)?.to_lowercase())
}

fn substring(params: &[String], _: &TestContext) -> ContextResult<String> {
    let [text, rest @ ..] = params else {
        return Err(ContextError::function_failed("substring", "missing parameters"));
    };
    let begin = rest
        .first()
        .map(|value| index("substring", value))
        .transpose()?
        .ok_or_else(|| ContextError::function_failed("substring", "missing begin index"))?;
    let end = rest
        .get(1)
        .map(|value| index("substring", value))
        .transpose()?
        .unwrap_or_else(|| text.chars().count());

    if begin > end || end > text.chars().count() {
        return Err(ContextError::function_failed(
            "substring",
            format!("range {begin}..{end} out of bounds for '{text}'"),
        ));
    }
    Ok(text.chars().skip(begin).take(end - begin).collect())
}

fn string_length(params: &[String], _: &TestContext) -> ContextResult<String> {
    Ok(single("stringLength", params)?.chars().count().to_string())
}

fn translate(params: &[String], _: &TestContext) -> ContextResult<String> {
    let [text, pattern, replacement] = params else {
        return Err(ContextError::function_failed(
            "translate",
            "expected text, pattern and replacement",
        ));
    };
    let regex = Regex::new(pattern)
        .map_err(|err| ContextError::function_failed("translate", err.to_string()))?;
    Ok(regex.replace_all(text, replacement.as_str()).into_owned())
}

fn random_number(params: &[String], _: &TestContext) -> ContextResult<String> {
    let length = params
        .first()
        .map(|value| index("randomNumber", value))
        .transpose()?
        .ok_or_else(|| ContextError::function_failed("randomNumber", "missing length"))?;
    let mut rng = rand::rng();
    let digits = (0..length)
        .map(|position| {
            let low = u32::from(position == 0 && length > 1);
            char::from_digit(rng.random_range(low..10), 10).unwrap_or('0')
        })
        .collect();
    Ok(digits)
}

fn random_string(params: &[String], _: &TestContext) -> ContextResult<String> {
    let length = params
        .first()
        .map(|value| index("randomString", value))
        .transpose()?
        .unwrap_or(10);
    let mode = params.get(1).map_or("MIXED", String::as_str);
    let with_numbers = params.get(2).is_some_and(|value| value == "true");

    let mut alphabet = match mode.to_ascii_uppercase().as_str() {
        "UPPERCASE" => "ABCDEFGHIJKLMNOPQRSTUVWXYZ".to_owned(),
        "LOWERCASE" => "abcdefghijklmnopqrstuvwxyz".to_owned(),
        _ => "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz".to_owned(),
    };
    if with_numbers {
        alphabet.push_str("0123456789");
    }
    let symbols = alphabet.chars().collect::<Vec<_>>();

    let mut rng = rand::rng();
    Ok((0..length)
        .filter_map(|_| symbols.get(rng.random_range(0..symbols.len())).copied())
        .collect())
}

fn random_uuid(_: &[String], _: &TestContext) -> ContextResult<String> {
    Ok(Uuid::new_v4().to_string())
}

fn current_date(params: &[String], context: &TestContext) -> ContextResult<String> {
    let pattern = params.first().map_or(DEFAULT_DATE_FORMAT, String::as_str);
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(ContextError::function_failed(
            "currentDate",
            format!("invalid date format '{pattern}'"),
        ));
    }
    let mut rendered = String::new();
    write!(rendered, "{}", context.clock().local().format(pattern))
        .map_err(|err| ContextError::function_failed("currentDate", err.to_string()))?;
    Ok(rendered)
}

fn sum(params: &[String], _: &TestContext) -> ContextResult<String> {
    let total: f64 = numbers("sum", params)?.into_iter().sum();
    Ok(render_number(total))
}

fn abs(params: &[String], _: &TestContext) -> ContextResult<String> {
    Ok(render_number(number("abs", single("abs", params)?)?.abs()))
}

fn max(params: &[String], _: &TestContext) -> ContextResult<String> {
    numbers("max", params)?
        .into_iter()
        .reduce(f64::max)
        .map(render_number)
        .ok_or_else(|| ContextError::function_failed("max", "no parameters"))
}

fn min(params: &[String], _: &TestContext) -> ContextResult<String> {
    numbers("min", params)?
        .into_iter()
        .reduce(f64::min)
        .map(render_number)
        .ok_or_else(|| ContextError::function_failed("min", "no parameters"))
}

fn floor(params: &[String], _: &TestContext) -> ContextResult<String> {
    Ok(render_number(number("floor", single("floor", params)?)?.floor()))
}

fn ceiling(params: &[String], _: &TestContext) -> ContextResult<String> {
    Ok(render_number(number("ceiling", single("ceiling", params)?)?.ceil()))
}

fn escape_xml(params: &[String], _: &TestContext) -> ContextResult<String> {
    let text = single("escapeXml", params)?;
    Ok(text
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;"))
}

fn encode_base64(params: &[String], _: &TestContext) -> ContextResult<String> {
    Ok(STANDARD.encode(single("encodeBase64", params)?.as_bytes()))
}

fn decode_base64(params: &[String], _: &TestContext) -> ContextResult<String> {
    let bytes = STANDARD
        .decode(single("decodeBase64", params)?.as_bytes())
        .map_err(|err| ContextError::function_failed("decodeBase64", err.to_string()))?;
    String::from_utf8(bytes)
        .map_err(|err| ContextError::function_failed("decodeBase64", err.to_string()))
}

fn single<'a>(function: &str, params: &'a [String]) -> ContextResult<&'a str> {
    match params {
        [value] => Ok(value.as_str()),
        _ => Err(ContextError::function_failed(
            function,
            format!("expected exactly one parameter, got {}", params.len()),
        )),
    }
}

fn index(function: &str, value: &str) -> ContextResult<usize> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| ContextError::function_failed(function, format!("'{value}' is not an index")))
}

fn number(function: &str, value: &str) -> ContextResult<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| ContextError::function_failed(function, format!("'{value}' is not a number")))
}

fn numbers(function: &str, params: &[String]) -> ContextResult<Vec<f64>> {
    params.iter().map(|value| number(function, value)).collect()
}

fn render_number(value: f64) -> String {
    value.to_string()
}
