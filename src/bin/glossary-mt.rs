use std::sync::Arc;

use clap::{Arg, ArgAction, Command};
use glossary_mt::{
    DictionaryIndex, GoogleTranslateClient, MockClient, MockMode, TranslationClient, Translator,
};

const SAMPLE_TERMINOLOGY: &str = "\
term,translation
house,efie
big house,efie kɛse
station,gyinabea
water,nsuo
school,sukuu
";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let matches = Command::new("glossary-mt")
        .version("0.1.0")
        .about("Terminology-controlled machine translation")
        .subcommand(
            Command::new("translate")
                .about("Translate text, pinning glossary terms")
                .arg(
                    Arg::new("text")
                        .help("Text to translate")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("target")
                        .long("target")
                        .short('t')
                        .help("Target language code (e.g. twi, ak, ee)")
                        .default_value("twi"),
                )
                .arg(
                    Arg::new("source")
                        .long("source")
                        .short('s')
                        .help("Source language code")
                        .default_value("en"),
                )
                .arg(
                    Arg::new("terminology")
                        .long("terminology")
                        .short('m')
                        .help("Path to a terminology CSV file"),
                )
                .arg(
                    Arg::new("pivot")
                        .long("pivot")
                        .help("Route the engine call through a pivot language (e.g. th)"),
                )
                .arg(
                    Arg::new("mock")
                        .long("mock")
                        .help("Use the mock engine instead of Google Translate")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output format")
                        .value_parser(["text", "json"])
                        .default_value("text"),
                ),
        )
        .subcommand(
            Command::new("terms")
                .about("List the loaded terminology")
                .arg(
                    Arg::new("terminology")
                        .long("terminology")
                        .short('m')
                        .required(true)
                        .help("Path to a terminology CSV file"),
                ),
        )
        .subcommand(
            Command::new("sample")
                .about("Write a starter terminology CSV")
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path")
                        .default_value("sample_terminology.csv"),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("translate", sub)) => {
            let text = sub.get_one::<String>("text").unwrap();
            let target = sub.get_one::<String>("target").unwrap();
            let source = sub.get_one::<String>("source").unwrap();
            let output = sub.get_one::<String>("output").unwrap();

            let dictionary = match sub.get_one::<String>("terminology") {
                Some(path) => DictionaryIndex::from_csv_path(path)?,
                None => DictionaryIndex::new(),
            };
            if dictionary.is_empty() {
                eprintln!("warning: no terminology loaded; output is plain machine translation");
            }

            let client: Arc<dyn TranslationClient> = if sub.get_flag("mock") {
                Arc::new(MockClient::new(MockMode::Echo))
            } else {
                Arc::new(GoogleTranslateClient::new()?)
            };

            let mut translator = Translator::new(client, dictionary, source, target)?;
            if let Some(pivot) = sub.get_one::<String>("pivot") {
                translator = translator.with_pivot(pivot)?;
            }

            let result = translator.translate(text).await?;
            if output == "json" {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", result.text);
                for warning in &result.warnings {
                    eprintln!("warning: {}", warning);
                }
            }
        }
        Some(("terms", sub)) => {
            let path = sub.get_one::<String>("terminology").unwrap();
            let dictionary = DictionaryIndex::from_csv_path(path)?;
            let mut entries: Vec<(&str, &str)> = dictionary.iter().collect();
            entries.sort();
            for (term, translation) in entries {
                println!("{} => {}", term, translation);
            }
            eprintln!("{} terms", dictionary.len());
        }
        Some(("sample", sub)) => {
            let path = sub.get_one::<String>("output").unwrap();
            std::fs::write(path, SAMPLE_TERMINOLOGY)?;
            eprintln!("wrote {}", path);
        }
        _ => {
            eprintln!("no command given; try `glossary-mt translate --help`");
        }
    }

    Ok(())
}
