use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};

use clap::{Arg, ArgAction, Command};
use serde_json::Value;

use flow_jieba_rs::{BatchOptions, DictionaryConfig, FlowItem, FlowTokenizer, TokenizeMode};

const MODE_LIST: [&str; 4] = ["default", "full", "search", "tag"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    const BLUE: &str = "\x1B[1;34m";
    const RESET: &str = "\x1B[0m";

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let matches = Command::new("Flow Jieba")
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("file")
                .help("Read records (JSON Lines) from <file>."),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("file")
                .help("Write tokenized records to <file>."),
        )
        .arg(
            Arg::new("mode")
                .short('m')
                .long("mode")
                .value_name("mode")
                .default_value("default")
                .help("Tokenize mode: [default|full|search|tag]"),
        )
        .arg(
            Arg::new("text_field")
                .long("text-field")
                .value_name("field")
                .default_value("text")
                .help("Record field holding the text to tokenize"),
        )
        .arg(
            Arg::new("dict_text")
                .long("dict-text")
                .value_name("entries")
                .help("Inline custom dictionary, one `word [freq [tag]]` per line"),
        )
        .arg(
            Arg::new("dict_file")
                .long("dict-file")
                .value_name("file")
                .help("Custom dictionary file, ingested by the engine as a whole"),
        )
        .arg(
            Arg::new("continue_on_fail")
                .long("continue-on-fail")
                .action(ArgAction::SetTrue)
                .help("Replace failing records with their error payload instead of aborting"),
        )
        .about(format!(
            "{}Flow Jieba: Per-record Chinese tokenizer for JSON Lines item streams{}",
            BLUE, RESET
        ))
        .get_matches();

    let mode_name = matches.get_one::<String>("mode").unwrap().as_str();
    let mode = match TokenizeMode::try_from(mode_name) {
        Ok(mode) => mode,
        Err(_) => {
            println!("Invalid mode: {}", mode_name);
            println!("Valid modes are: [{}]", MODE_LIST.join("|"));
            return Ok(());
        }
    };

    let dict_text = matches.get_one::<String>("dict_text");
    let dict_file = matches.get_one::<String>("dict_file");
    let dictionary = match (dict_text, dict_file) {
        (Some(_), Some(_)) => {
            println!("Use either --dict-text or --dict-file, not both.");
            return Ok(());
        }
        (Some(text), None) => DictionaryConfig::Inline(text.to_owned()),
        (None, Some(path)) => DictionaryConfig::File(path.into()),
        (None, None) => DictionaryConfig::None,
    };

    let opts = BatchOptions {
        text_field: matches.get_one::<String>("text_field").unwrap().to_owned(),
        mode,
        dictionary,
        continue_on_fail: matches.get_flag("continue_on_fail"),
    };

    let input_file = matches.get_one::<String>("input");
    let reader: Box<dyn BufRead> = match input_file {
        Some(file_name) => Box::new(BufReader::new(File::open(file_name)?)),
        None => {
            println!("{BLUE}Input records (one JSON object per line), <ctrl-d> to submit:{RESET}");
            Box::new(BufReader::new(io::stdin()))
        }
    };

    let mut items = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        items.push(parse_record(&line)?);
    }

    let mut tokenizer = FlowTokenizer::new();
    let records = tokenizer.process_batch(&items, &opts)?;

    let output_file = matches.get_one::<String>("output");
    let output: Box<dyn Write> = match output_file {
        Some(file_name) => Box::new(File::create(file_name)?),
        None => Box::new(io::stdout()),
    };
    let mut output_buf = BufWriter::new(output);
    for record in &records {
        serde_json::to_writer(&mut output_buf, record)?;
        output_buf.write_all(b"\n")?;
    }
    output_buf.flush()?;

    Ok(())
}

/// Accepts both the wrapped item shape `{"json": {…}, "pairedItem": …}` and
/// a bare payload object, which becomes the item's `json`.
fn parse_record(line: &str) -> Result<FlowItem, Box<dyn std::error::Error>> {
    let value: Value = serde_json::from_str(line)?;
    match value {
        Value::Object(map) if map.get("json").is_some_and(Value::is_object) => {
            Ok(serde_json::from_value(Value::Object(map))?)
        }
        Value::Object(map) => Ok(FlowItem::from_json(map)),
        _ => Err(format!("record is not a JSON object: {line}").into()),
    }
}
