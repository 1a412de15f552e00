//! attrkit CLI - Inspect value kinds, conversions, selectors and tags.

use attrkit::select::{CachedSubSelection, SubSelection};
use attrkit::tags::{try_parse_tag, ParsedTag};
use attrkit::types::{convert, text, trait_of, Value, ValueKind};
use attrkit::Result;
use std::env;
use tracing_subscriber::EnvFilter;

/// Verbosity level
const LOG_QUIET: u8 = 0;
const LOG_INFO: u8 = 1;
const LOG_DEBUG: u8 = 2;
const LOG_TRACE: u8 = 3;

fn init_tracing(level: u8) {
    let default = match level {
        LOG_QUIET => "error",
        LOG_INFO => "warn",
        LOG_DEBUG => "attrkit=debug",
        _ => "attrkit=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let args: Vec<String> = env::args().collect();

    // Parse global flags
    let mut level = LOG_INFO;
    let mut json = false;
    let mut filtered_args: Vec<&str> = Vec::new();
    for arg in &args[1..] {
        match arg.as_str() {
            "-v" | "--verbose" => level = LOG_DEBUG,
            "-vv" | "--trace" => level = LOG_TRACE,
            "-q" | "--quiet" => level = LOG_QUIET,
            "-j" | "--json" => json = true,
            _ => filtered_args.push(arg),
        }
    }
    init_tracing(level);
    attrkit::init();

    if filtered_args.is_empty() {
        print_help();
        return;
    }

    let result = match filtered_args[0] {
        "kinds" | "k" => cmd_kinds(json),
        "convert" | "c" => {
            if filtered_args.len() < 4 {
                usage("attrkit-cli convert <kind> <text> <to-kind>");
            }
            cmd_convert(filtered_args[1], filtered_args[2], filtered_args[3], json)
        }
        "select" | "s" => {
            if filtered_args.len() < 4 {
                usage("attrkit-cli select <kind> <text> <.path> [working-kind]");
            }
            cmd_select(filtered_args[1], filtered_args[2], filtered_args[3], filtered_args.get(4).copied(), json)
        }
        "tag" | "t" => {
            if filtered_args.len() < 2 {
                usage("attrkit-cli tag <tag>...");
            }
            cmd_tag(&filtered_args[1..], json)
        }
        "version" | "--version" | "-V" => {
            print_version();
            Ok(())
        }
        "help" | "h" | "-h" | "--help" => {
            print_help();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {}", other);
            eprintln!();
            print_help();
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn usage(text: &str) -> ! {
    eprintln!("Error: missing arguments");
    eprintln!("Usage: {}", text);
    std::process::exit(1);
}

fn print_help() {
    println!("attrkit-cli - attribute value toolkit");
    println!();
    println!("USAGE:");
    println!("    attrkit-cli [OPTIONS] <COMMAND> [ARGS]");
    println!();
    println!("COMMANDS:");
    println!("    k, kinds                                   List value kinds and their traits");
    println!("    c, convert <kind> <text> <to-kind>         Parse a value and convert it");
    println!("    s, select  <kind> <text> <.path> [kind]    Read a field/axis/component of a value");
    println!("    t, tag     <tag>...                        Parse Key:Value tags");
    println!("    version                                    Show version and build date");
    println!("    help                                       Show this help");
    println!();
    println!("OPTIONS:");
    println!("    -v, --verbose    Debug logging");
    println!("    -vv, --trace     Trace logging");
    println!("    -q, --quiet      Errors only");
    println!("    -j, --json       JSON output");
    println!();
    println!("EXAMPLES:");
    println!("    attrkit-cli convert double 12.5 vector3");
    println!("    attrkit-cli select quaternion 0,0,0,1 .Up");
    println!("    attrkit-cli tag Count:7 Hero Dir:0,0,1");
}

fn version_string() -> String {
    let date = option_env!("ATTRKIT_BUILD_DATE").unwrap_or("unknown");
    let time = option_env!("ATTRKIT_BUILD_TIME").unwrap_or("unknown");
    format!("attrkit-cli {} (built {} {})", env!("CARGO_PKG_VERSION"), date, time)
}

fn print_version() {
    println!("{}", version_string());
}

/// Parse `text` as a value of `kind` through the String conversion row.
fn parse_value(kind: ValueKind, text: &str) -> Result<Value> {
    convert(&Value::string(text), kind)
        .ok_or_else(|| attrkit::Error::other(format!("\"{}\" is not a valid {}", text, kind)))
}

fn cmd_kinds(json: bool) -> Result<()> {
    if json {
        let rows: Vec<_> = ValueKind::ALL
            .iter()
            .map(|&k| {
                let t = trait_of(k);
                serde_json::json!({
                    "kind": k.name(),
                    "numeric": t.is_numeric,
                    "vector": t.is_vector,
                    "rotation": t.is_rotation,
                    "string": t.is_string,
                    "lerp": t.supports_lerp,
                    "min_max": t.supports_min_max,
                    "arithmetic": t.supports_arithmetic,
                    "fields": k.field_count(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let flag = |b: bool| if b { "x" } else { "." };
    println!("{:<14} {:>3}  num vec rot str lerp minmax arith", "kind", "fld");
    for &k in &ValueKind::ALL {
        let t = trait_of(k);
        println!(
            "{:<14} {:>3}   {}   {}   {}   {}    {}     {}     {}",
            k.name(),
            k.field_count(),
            flag(t.is_numeric),
            flag(t.is_vector),
            flag(t.is_rotation),
            flag(t.is_string),
            flag(t.supports_lerp),
            flag(t.supports_min_max),
            flag(t.supports_arithmetic),
        );
    }
    Ok(())
}

fn cmd_convert(kind: &str, input: &str, to: &str, json: bool) -> Result<()> {
    let kind: ValueKind = kind.parse()?;
    let to: ValueKind = to.parse()?;
    let value = parse_value(kind, input)?;
    tracing::debug!("Parsed {:?}", value);

    let converted = convert(&value, to);
    if converted.is_none() {
        tracing::warn!("No conversion from {} to {}", kind, to);
    }
    let out = converted.unwrap_or_else(|| Value::default_of(to));
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "from": kind.name(),
                "to": to.name(),
                "input": text::format_value(&value),
                "output": text::format_value(&out),
            }))?
        );
    } else {
        println!("{} -> {}: {}", kind, to, text::format_value(&out));
    }
    Ok(())
}

fn cmd_select(kind: &str, input: &str, path: &str, working: Option<&str>, json: bool) -> Result<()> {
    let real: ValueKind = kind.parse()?;
    let value = parse_value(real, input)?;
    let selection = SubSelection::from_path(path);
    let working = match working {
        Some(k) => k.parse()?,
        None => selection.get_result_kind(real),
    };
    let cached = CachedSubSelection::resolve(&selection, real, working);
    if !cached.applies_to_source_read() {
        tracing::warn!("\"{}\" does not apply to {}; reading the whole value", path, real);
    }
    let out = cached.apply_get(&value);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "real": real.name(),
                "working": working.name(),
                "valid": selection.is_valid,
                "applies": cached.applies_to_source_read(),
                "output": text::format_value(&out),
            }))?
        );
    } else {
        println!("{}{} as {}: {}", real, path, working, text::format_value(&out));
    }
    Ok(())
}

fn cmd_tag(tags: &[&str], json: bool) -> Result<()> {
    let mut rows = Vec::with_capacity(tags.len());
    for &tag in tags {
        let parsed = try_parse_tag(tag);
        match &parsed {
            ParsedTag::Raw(raw) => {
                if json {
                    rows.push(serde_json::json!({ "tag": tag, "key": raw, "raw": true }));
                } else {
                    println!("{:<24} raw", raw);
                }
            }
            ParsedTag::Value { key, value } => {
                let class = if value.is_numeric() {
                    "numeric"
                } else if value.is_text() {
                    "text"
                } else {
                    "other"
                };
                if json {
                    rows.push(serde_json::json!({
                        "tag": tag,
                        "key": key,
                        "raw": false,
                        "kind": value.kind().name(),
                        "class": class,
                        "value": value.as_string(),
                        "flat": parsed.flatten(),
                    }));
                } else {
                    println!(
                        "{:<24} {:<8} {:<8} {} -> {}",
                        key,
                        value.kind(),
                        class,
                        value.as_string(),
                        parsed.flatten()
                    );
                }
            }
        }
    }
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    }
    Ok(())
}
