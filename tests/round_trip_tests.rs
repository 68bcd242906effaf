//! End-to-end correction round trip
//!
//! Scrape a real HTML file, export the editable CSV, simulate an editor
//! filling in replacements, and apply the result back to the file.

use copylens::domain::services::IssueDetector;
use copylens::infrastructure::{
    CorrectionStore, DocumentPatcher, HtmlContentExtractor, PatchOutcome,
};
use std::path::{Path, PathBuf};

const PAGE: &str = r#"<html><body>
    <h1 id="headline">Welcome to lorem ipsum dolor</h1>
    <p class="intro">Please sign in to continue</p>
    <button class="cta">Get started with your account today</button>
    <input placeholder="TODO: hint text">
</body></html>"#;

async fn write_page(dir: &Path) -> PathBuf {
    let path = dir.join("landing.html");
    tokio::fs::write(&path, PAGE).await.unwrap();
    path
}

/// Rewrite the `Corrected Content` column for rows whose original text
/// matches, the way an editor would in a spreadsheet.
fn edit_csv(export: &str, edits: &[(&str, &str)]) -> String {
    let mut reader = csv::Reader::from_reader(export.as_bytes());
    let headers = reader.headers().unwrap().clone();
    let original_idx = headers.iter().position(|h| h == "Original Content").unwrap();
    let corrected_idx = headers.iter().position(|h| h == "Corrected Content").unwrap();

    let mut buffer = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buffer);
        writer.write_record(&headers).unwrap();
        for record in reader.records() {
            let record = record.unwrap();
            let mut fields: Vec<String> = record.iter().map(str::to_string).collect();
            if let Some((_, replacement)) = edits
                .iter()
                .find(|(original, _)| fields[original_idx] == *original)
            {
                fields[corrected_idx] = replacement.to_string();
            }
            writer.write_record(&fields).unwrap();
        }
        writer.flush().unwrap();
    }
    String::from_utf8(buffer).unwrap()
}

#[tokio::test]
async fn full_cycle_applies_editor_corrections() {
    let dir = tempfile::tempdir().unwrap();
    let html_path = write_page(dir.path()).await;

    // scrape and export
    let extractor = HtmlContentExtractor::new().unwrap();
    let result = extractor.extract_file(&html_path).await.unwrap();
    let reviewed = IssueDetector::new().unwrap().review(&result.items);

    let store = CorrectionStore::new(dir.path().join("output"));
    let csv_path = store.write_export(&reviewed, &result.source_name).await.unwrap();
    let export = tokio::fs::read_to_string(&csv_path).await.unwrap();

    // editor fixes the flagged headline and the placeholder hint
    let edited = edit_csv(
        &export,
        &[
            ("Welcome to lorem ipsum dolor", "Welcome to Acme"),
            ("TODO: hint text", "Enter your email"),
        ],
    );
    let edited_path = dir.path().join("edited.csv");
    tokio::fs::write(&edited_path, edited).await.unwrap();

    // import and apply
    let corrections = store.read_corrections(&edited_path).await.unwrap();
    assert_eq!(corrections.len(), 2);

    let patcher = DocumentPatcher::new(dir.path().join("backups")).unwrap();
    let outcome = patcher.apply_to_file(&html_path, &corrections).await.unwrap();
    let PatchOutcome::Applied(stats) = outcome else {
        panic!("expected an applied outcome");
    };
    assert_eq!(stats.applied, 2);
    assert_eq!(stats.skipped, 0);

    let patched = tokio::fs::read_to_string(&html_path).await.unwrap();
    assert!(patched.contains("Welcome to Acme"));
    assert!(patched.contains(r#"placeholder="Enter your email""#));
    assert!(!patched.contains("lorem ipsum"));

    // a backup of the original survives
    let backup_path = std::fs::read_dir(dir.path().join("backups"))
        .unwrap()
        .next()
        .unwrap()
        .unwrap()
        .path();
    let backup = std::fs::read_to_string(backup_path).unwrap();
    assert_eq!(backup, PAGE);

    // the patched file re-scrapes cleanly at the same identities
    let rescraped = extractor.extract_file(&html_path).await.unwrap();
    let headline = rescraped
        .items
        .iter()
        .find(|item| item.tag == "h1")
        .unwrap();
    assert_eq!(headline.identity, "#headline");
    assert_eq!(headline.original_text, "Welcome to Acme");
}

#[tokio::test]
async fn unedited_export_yields_zero_corrections() {
    let dir = tempfile::tempdir().unwrap();
    let html_path = write_page(dir.path()).await;

    let extractor = HtmlContentExtractor::new().unwrap();
    let result = extractor.extract_file(&html_path).await.unwrap();
    let reviewed = IssueDetector::new().unwrap().review(&result.items);

    let store = CorrectionStore::new(dir.path().join("output"));
    let csv_path = store.write_export(&reviewed, &result.source_name).await.unwrap();

    let corrections = store.read_corrections(&csv_path).await.unwrap();
    assert!(corrections.is_empty());
}

#[tokio::test]
async fn reapplying_the_same_corrections_is_a_noop() {
    let dir = tempfile::tempdir().unwrap();
    let html_path = write_page(dir.path()).await;

    let corrections = vec![copylens::domain::content::Correction {
        id: "landing_0".to_string(),
        identity: "#headline".to_string(),
        tag: "h1".to_string(),
        original_text: "Welcome to lorem ipsum dolor".to_string(),
        corrected_text: "Welcome to Acme".to_string(),
    }];

    let patcher = DocumentPatcher::new(dir.path().join("backups")).unwrap();

    let PatchOutcome::Applied(first) =
        patcher.apply_to_file(&html_path, &corrections).await.unwrap()
    else {
        panic!("expected an applied outcome");
    };
    assert_eq!(first.applied, 1);

    let PatchOutcome::Applied(second) =
        patcher.apply_to_file(&html_path, &corrections).await.unwrap()
    else {
        panic!("expected an applied outcome");
    };
    assert_eq!(second.applied, 0);
    assert_eq!(second.skipped, 1);
}

#[tokio::test]
async fn scraping_a_directory_merges_all_pages() {
    let dir = tempfile::tempdir().unwrap();
    let pages = dir.path().join("pages");
    tokio::fs::create_dir_all(&pages).await.unwrap();
    tokio::fs::write(pages.join("a.html"), "<html><body><p>Alpha</p></body></html>")
        .await
        .unwrap();
    tokio::fs::write(pages.join("b.html"), "<html><body><p>Beta</p></body></html>")
        .await
        .unwrap();
    tokio::fs::write(pages.join("notes.txt"), "ignored").await.unwrap();

    let extractor = HtmlContentExtractor::new().unwrap();
    let result = extractor.extract_directory(&pages).await.unwrap();

    let texts: Vec<&str> = result
        .items
        .iter()
        .map(|item| item.original_text.as_str())
        .collect();
    assert_eq!(texts, vec!["Alpha", "Beta"]);
    assert_eq!(result.stats.total_items, 2);
}
