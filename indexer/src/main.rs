use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use folio_core::builder::IndexBuilder;
use folio_core::persist::{save_bundle, IndexPaths};
use folio_core::{CoverImage, IdfMode, SearchDocument};
use serde::Deserialize;
use tracing_subscriber::{EnvFilter, fmt};
use walkdir::WalkDir;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Characters kept when an excerpt is cut from the post body.
const EXCERPT_LEN: usize = 140;

#[derive(Debug, Deserialize)]
struct InputPost {
    #[serde(alias = "slug")]
    url: String,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    excerpt: Option<String>,
    #[serde(default)]
    body: String,
    #[serde(default)]
    cover: Option<CoverImage>,
    #[serde(default)]
    tags: Vec<String>,
}

impl InputPost {
    fn into_document(self) -> (SearchDocument, String) {
        let excerpt = match self.excerpt {
            Some(e) if !e.trim().is_empty() => e,
            _ => excerpt_from(&self.body),
        };
        let doc = SearchDocument {
            url: self.url,
            title: self.title,
            description: self.description.filter(|d| !d.trim().is_empty()),
            excerpt,
            cover: self.cover,
            tags: self.tags,
        };
        (doc, self.body)
    }
}

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build the blog search index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index from post JSON/JSONL files or a directory of them
    Build {
        /// Input path (file or directory)
        #[arg(long)]
        input: String,
        /// Output index directory
        #[arg(long)]
        output: String,
        /// Use smoothed IDF = ln(1 + N/df) instead of the probabilistic form
        #[arg(long, default_value_t = false)]
        smoothed_idf: bool,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output, smoothed_idf } => {
            build_index(Path::new(&input), Path::new(&output), smoothed_idf)
        }
    }
}

fn build_index(input: &Path, output: &Path, smoothed_idf: bool) -> Result<()> {
    let mode = if smoothed_idf { IdfMode::Smoothed } else { IdfMode::Probabilistic };
    let mut builder = IndexBuilder::new().idf_mode(mode);
    for file in input_files(input) {
        let posts = read_posts(&file).with_context(|| format!("reading {}", file.display()))?;
        tracing::debug!(file = %file.display(), posts = posts.len(), "read posts");
        for post in posts {
            let (doc, body) = post.into_document();
            builder.add(doc, &body).with_context(|| format!("indexing {}", file.display()))?;
        }
    }
    tracing::info!(num_docs = builder.len(), "ingested posts");

    let bundle = builder.finish()?;
    let created_at = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_default();
    save_bundle(&IndexPaths::new(output), &bundle, created_at)?;

    tracing::info!(output = %output.display(), num_terms = bundle.index().dictionary.len(), "index build complete");
    Ok(())
}

/// `.json`/`.jsonl` files under `input`, sorted so builds are reproducible.
fn input_files(input: &Path) -> Vec<PathBuf> {
    if input.is_file() {
        return vec![input.to_path_buf()];
    }
    let mut files: Vec<PathBuf> = WalkDir::new(input)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && matches!(p.extension().and_then(|s| s.to_str()), Some("json" | "jsonl")))
        .collect();
    files.sort();
    files
}

fn read_posts(file: &Path) -> Result<Vec<InputPost>> {
    let reader = BufReader::new(File::open(file)?);
    if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
        let mut posts = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() { continue; }
            posts.push(serde_json::from_str(&line)?);
        }
        return Ok(posts);
    }
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    let posts = match json {
        serde_json::Value::Array(arr) => arr
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<InputPost>, _>>()?,
        obj @ serde_json::Value::Object(_) => vec![serde_json::from_value(obj)?],
        other => bail!("{}: expected a post object or an array of posts, found {}", file.display(), json_kind(&other)),
    };
    Ok(posts)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// First `EXCERPT_LEN` characters of `body`, cut back to a word boundary.
fn excerpt_from(body: &str) -> String {
    let text = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.chars().count() <= EXCERPT_LEN {
        return text;
    }
    let cut: String = text.chars().take(EXCERPT_LEN).collect();
    let trimmed = match cut.rfind(' ') {
        Some(i) => &cut[..i],
        None => cut.as_str(),
    };
    format!("{}…", trimmed.trim_end_matches(|c: char| c.is_ascii_punctuation()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::persist::load_bundle;
    use folio_core::search::Searcher;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn short_body_is_its_own_excerpt() {
        assert_eq!(excerpt_from("Hello\n  world"), "Hello world");
    }

    #[test]
    fn long_body_is_cut_at_a_word() {
        let body = "word ".repeat(60);
        let e = excerpt_from(&body);
        assert!(e.ends_with("word…"));
        assert!(e.chars().count() <= EXCERPT_LEN + 1);
    }

    #[test]
    fn builds_from_json_and_jsonl() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("posts");
        fs::create_dir_all(&input).unwrap();
        fs::write(
            input.join("a.json"),
            r#"[{"slug":"/react-hooks/","title":"React hooks","description":"","cover":"/img/hooks.png","tags":["React"],"body":"useState and useEffect"}]"#,
        )
        .unwrap();
        fs::write(
            input.join("b.jsonl"),
            "{\"url\":\"/clojure/\",\"title\":\"Learning Clojure\",\"cover\":{\"src\":\"/c.png\",\"width\":65,\"height\":65},\"body\":\"parens\"}\n\n",
        )
        .unwrap();
        fs::write(input.join("notes.txt"), "ignored").unwrap();

        let out = dir.path().join("index");
        build_index(&input, &out, false).unwrap();

        let s = Searcher::new(load_bundle(&IndexPaths::new(&out)).unwrap());
        assert_eq!(s.doc_count(), 2);
        let hits = s.search("react");
        assert_eq!(hits[0].url, "/react-hooks/");
        assert_eq!(hits[0].description, None);
        assert_eq!(hits[0].excerpt, "useState and useEffect");
        assert!(matches!(s.search("clojure")[0].cover, Some(CoverImage::Processed(_))));
    }

    #[test]
    fn duplicate_urls_fail_the_build() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("dup.json");
        fs::write(&file, r#"[{"url":"/a/","title":"A"},{"url":"/a/","title":"B"}]"#).unwrap();
        assert!(build_index(&file, &dir.path().join("index"), false).is_err());
    }

    #[test]
    fn scalar_json_fails_the_build() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("posts.json");
        fs::write(&file, "42").unwrap();
        let err = read_posts(&file).unwrap_err().to_string();
        assert!(err.contains("posts.json"));
        assert!(err.contains("a number"));
        assert!(build_index(&file, &dir.path().join("index"), false).is_err());
    }
}
