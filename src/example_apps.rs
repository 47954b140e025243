use std::error::Error;
use std::fmt::Write as _;
use std::path::PathBuf;

use clap::{Parser, ValueEnum, error::ErrorKind};

use crate::aggregate::{CrossTab, FrequencyTable};
use crate::config::{InsightsConfig, ThemeLabels};
use crate::constants::cli::{DATA_PATH_ENV, DEFAULT_DATA_PATH};
use crate::constants::sentinels::{NO_PAIN_POINT, NO_SUGGESTION};
use crate::dashboard::DashboardSnapshot;
use crate::data::Sentiment;
use crate::filter::FilterSelection;
use crate::source::CsvReviewSource;
use crate::store::RecordStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SentimentArg {
    Positive,
    Neutral,
    Negative,
}

impl From<SentimentArg> for Sentiment {
    fn from(value: SentimentArg) -> Self {
        match value {
            SentimentArg::Positive => Sentiment::Positive,
            SentimentArg::Neutral => Sentiment::Neutral,
            SentimentArg::Negative => Sentiment::Negative,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "review_dashboard",
    disable_help_subcommand = true,
    about = "Summarize labeled product reviews",
    long_about = "Filter pre-labeled reviews by sentiment, pain point and theme, then print sentiment, theme, pain-point and suggestion distributions with headline metrics.",
    after_help = "The dataset path is resolved in order by explicit arg, the REVIEW_INSIGHTS_DATA environment variable, then ./processed_reviews.csv. Facet flags may be repeated; an omitted facet keeps every value present in the dataset."
)]
/// CLI for `review_dashboard`.
///
/// Common usage:
/// - Whole dataset: `review_dashboard --data reviews.csv`
/// - Negative reviews about one theme: `--sentiment negative --theme "Price and Value"`
/// - Machine-readable output: `--json`
struct ReviewDashboardCli {
    #[arg(long = "data", value_name = "PATH", help = "Processed review CSV")]
    data: Option<PathBuf>,
    #[arg(
        long = "theme-labels",
        value_name = "PATH",
        help = "JSON object mapping theme ids to labels"
    )]
    theme_labels: Option<PathBuf>,
    #[arg(
        long = "sentiment",
        value_enum,
        help = "Sentiment to include, repeat as needed"
    )]
    sentiments: Vec<SentimentArg>,
    #[arg(
        long = "pain-point",
        value_name = "LABEL",
        help = "Pain point to include, repeat as needed"
    )]
    pain_points: Vec<String>,
    #[arg(
        long = "theme",
        value_name = "LABEL",
        help = "Theme label to include, repeat as needed"
    )]
    themes: Vec<String>,
    #[arg(long, value_name = "ID", help = "Product to show in the review list")]
    product: Option<String>,
    #[arg(
        long = "no-pain-point",
        value_name = "LABEL",
        default_value = NO_PAIN_POINT,
        help = "Label meaning no pain point was identified"
    )]
    no_pain_point: String,
    #[arg(
        long = "no-suggestion",
        value_name = "LABEL",
        default_value = NO_SUGGESTION,
        help = "Label meaning no suggestion was identified"
    )]
    no_suggestion: String,
    #[arg(
        long = "detail-limit",
        default_value_t = 10,
        help = "Maximum review rows printed in text mode"
    )]
    detail_limit: usize,
    #[arg(long, help = "Print the snapshot as JSON")]
    json: bool,
}

/// Load reviews, apply facet flags, and print a dashboard snapshot.
pub fn run_review_dashboard<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let Some(cli) = parse_cli::<ReviewDashboardCli, _>(
        std::iter::once("review_dashboard".to_string()).chain(args_iter),
    )?
    else {
        return Ok(());
    };

    let output = render_dashboard(&cli)?;
    print!("{output}");
    Ok(())
}

fn render_dashboard(cli: &ReviewDashboardCli) -> Result<String, Box<dyn Error>> {
    let theme_labels = match &cli.theme_labels {
        Some(path) => ThemeLabels::from_json_file(path)?,
        None => ThemeLabels::default(),
    };
    let config = InsightsConfig::default()
        .with_theme_labels(theme_labels)
        .with_no_pain_point(cli.no_pain_point.clone())
        .with_no_suggestion(cli.no_suggestion.clone());

    let data_path = resolve_data_path(cli.data.clone());
    let source = CsvReviewSource::from_path(data_path);
    let store = RecordStore::load(&source, config)?;

    let selection = selection_from_cli(cli, &store);
    let snapshot = DashboardSnapshot::build(&store, &selection, cli.product.as_deref());

    if cli.json {
        let mut json = serde_json::to_string_pretty(&snapshot)?;
        json.push('\n');
        Ok(json)
    } else {
        Ok(render_text(&snapshot, cli.detail_limit))
    }
}

fn resolve_data_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| {
            std::env::var_os(DATA_PATH_ENV)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        })
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH))
}

fn selection_from_cli(cli: &ReviewDashboardCli, store: &RecordStore) -> FilterSelection {
    let mut selection = store.default_selection();
    if !cli.sentiments.is_empty() {
        selection =
            selection.with_sentiments(cli.sentiments.iter().copied().map(Sentiment::from));
    }
    if !cli.pain_points.is_empty() {
        selection = selection.with_pain_points(cli.pain_points.iter().cloned());
    }
    if !cli.themes.is_empty() {
        selection = selection.with_theme_labels(cli.themes.iter().cloned());
    }
    selection
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}

fn render_text(snapshot: &DashboardSnapshot<'_>, detail_limit: usize) -> String {
    let mut out = String::new();
    let metrics = &snapshot.metrics;
    let _ = writeln!(out, "=== Review insights ===");
    let _ = writeln!(out, "reviews        : {}", metrics.total);
    let _ = writeln!(out, "positive       : {:.1}%", metrics.positive_pct);
    let _ = writeln!(out, "negative       : {:.1}%", metrics.negative_pct);
    let _ = writeln!(out, "neutral        : {:.1}%", metrics.neutral_pct);
    let _ = writeln!(out, "with pain point: {:.1}%", metrics.pain_point_pct);
    let _ = writeln!(out, "with suggestion: {:.1}%", metrics.suggestion_pct);

    write_table(&mut out, "Sentiment distribution", &snapshot.sentiment);
    write_table(&mut out, "Top themes", &snapshot.themes);
    write_table(&mut out, "Pain points", &snapshot.pain_points);
    write_table(&mut out, "Suggestions", &snapshot.suggestions);
    write_cross_tab(&mut out, "Sentiment by theme", &snapshot.sentiment_by_theme);

    let _ = writeln!(out, "--- Review details ---");
    match &snapshot.selected_product {
        Some(product) => {
            let _ = writeln!(
                out,
                "product: {product} ({} products in view)",
                snapshot.product_ids.len()
            );
        }
        None => {
            let _ = writeln!(out, "showing all reviews in view");
        }
    }
    for record in snapshot.details.iter().take(detail_limit) {
        let _ = writeln!(
            out,
            "[{}] {:.1} {} | {} | pain={} | suggestion={}",
            record.product_id,
            record.overall_rating,
            record.sentiment,
            record.theme_label,
            record.pain_point,
            record.suggestion
        );
        let _ = writeln!(out, "    {}", record.review_text);
    }
    if snapshot.details.len() > detail_limit {
        let _ = writeln!(
            out,
            "... {} more reviews",
            snapshot.details.len() - detail_limit
        );
    }
    out
}

fn write_table(out: &mut String, title: &str, table: &FrequencyTable) {
    let _ = writeln!(out, "--- {title} ---");
    if table.is_empty() {
        let _ = writeln!(out, "(no reviews)");
        return;
    }
    for (entry, (_, share)) in table.entries().iter().zip(table.shares()) {
        let _ = writeln!(
            out,
            "{}: count={} share={:.2}",
            entry.category, entry.count, share
        );
    }
}

fn write_cross_tab(out: &mut String, title: &str, tab: &CrossTab) {
    let _ = writeln!(out, "--- {title} ---");
    if tab.is_empty() {
        let _ = writeln!(out, "(no reviews)");
        return;
    }
    let cols = tab.col_values();
    for (row, counts) in tab.row_values().into_iter().zip(tab.to_dense()) {
        let cells: Vec<String> = cols
            .iter()
            .zip(counts)
            .map(|(col, count)| format!("{col}={count}"))
            .collect();
        let _ = writeln!(out, "{row}: {}", cells.join(" "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::Path;
    use tempfile::tempdir;

    const HEADER: &str = "asin,reviewText,overall,sentiment,theme,pain_point,suggestion\n";

    fn write_dataset(dir: &Path, rows: &[&str]) -> PathBuf {
        let path = dir.join("processed_reviews.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(HEADER.as_bytes()).unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
        path
    }

    fn cli(args: &[&str]) -> ReviewDashboardCli {
        parse_cli::<ReviewDashboardCli, _>(
            std::iter::once("review_dashboard").chain(args.iter().copied()),
        )
        .unwrap()
        .unwrap()
    }

    #[test]
    fn help_is_printed_without_error() {
        let parsed = parse_cli::<ReviewDashboardCli, _>(["review_dashboard", "--help"]).unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn unknown_sentiment_flag_is_rejected() {
        let result =
            parse_cli::<ReviewDashboardCli, _>(["review_dashboard", "--sentiment", "mixed"]);
        assert!(result.is_err());
    }

    #[test]
    fn explicit_data_path_wins() {
        let path = resolve_data_path(Some(PathBuf::from("/tmp/explicit.csv")));
        assert_eq!(path, PathBuf::from("/tmp/explicit.csv"));
    }

    #[test]
    fn text_report_reflects_facet_flags() {
        let dir = tempdir().unwrap();
        let path = write_dataset(
            dir.path(),
            &[
                "B01,Charges slowly,2.0,NEGATIVE,0,battery life,faster charging",
                "B01,Love it,5.0,POSITIVE,2,none,none",
                "B02,Too expensive,2.0,NEGATIVE,3,price,none",
            ],
        );
        let parsed = cli(&[
            "--data",
            path.to_str().unwrap(),
            "--sentiment",
            "negative",
        ]);
        let report = render_dashboard(&parsed).unwrap();
        assert!(report.contains("reviews        : 2"));
        assert!(report.contains("NEGATIVE: count=2 share=1.00"));
        assert!(report.contains("Battery and Charging: NEGATIVE=1"));
        assert!(report.contains("product: B01 (2 products in view)"));
        assert!(!report.contains("Love it"));
    }

    #[test]
    fn json_report_uses_custom_theme_labels() {
        let dir = tempdir().unwrap();
        let path = write_dataset(dir.path(), &["B01,Loud and clear,5.0,POSITIVE,0,none,none"]);
        let labels = dir.path().join("themes.json");
        std::fs::write(&labels, r#"{"0": "Sound Quality"}"#).unwrap();
        let parsed = cli(&[
            "--data",
            path.to_str().unwrap(),
            "--theme-labels",
            labels.to_str().unwrap(),
            "--json",
        ]);
        let report = render_dashboard(&parsed).unwrap();
        let json: serde_json::Value = serde_json::from_str(&report).unwrap();
        assert_eq!(json["themes"]["entries"][0]["category"], "Sound Quality");
        assert_eq!(json["metrics"]["total"], 1);
    }

    #[test]
    fn missing_dataset_is_reported_as_unavailable() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("absent.csv");
        let parsed = cli(&["--data", missing.to_str().unwrap()]);
        let err = render_dashboard(&parsed).unwrap_err();
        assert!(err.to_string().contains("unavailable"));
    }

    #[test]
    fn empty_pain_point_match_renders_empty_tables() {
        let dir = tempdir().unwrap();
        let path = write_dataset(dir.path(), &["B01,Fine,4.0,NEUTRAL,1,none,none"]);
        let parsed = cli(&[
            "--data",
            path.to_str().unwrap(),
            "--pain-point",
            "does not exist",
        ]);
        let report = render_dashboard(&parsed).unwrap();
        assert!(report.contains("reviews        : 0"));
        assert!(report.contains("positive       : 0.0%"));
        assert!(report.contains("(no reviews)"));
    }
}
