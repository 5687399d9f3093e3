//! Integration tests for the fetch/fill/export pipeline

use acrofill::config::AppConfig;
use acrofill::form::{fill_text_fields, list_fields, FieldMapping};
use acrofill::pipeline::{download, generate, store_template_cache, UserData};
use acrofill::source::{TemplateCache, TemplateSource};
use lopdf::{dictionary, Document, Object, ObjectId};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::path::PathBuf;

/// Build a one-page template with the text fields the demo form expects.
fn demo_template() -> Vec<u8> {
    template_with_fields(&[
        "name[first]",
        "name[last]",
        "email",
        "phone[area]",
        "phone[phone]",
    ])
}

fn template_with_fields(names: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id: ObjectId = doc.new_object_id();
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::from(page_id)],
            "Count" => 1i64,
        }),
    );

    let field_ids: Vec<Object> = names
        .iter()
        .map(|name| {
            doc.add_object(dictionary! {
                "Type" => "Annot",
                "Subtype" => "Widget",
                "FT" => "Tx",
                "T" => Object::string_literal(*name),
                "Rect" => vec![100.into(), 700.into(), 300.into(), 720.into()],
            })
            .into()
        })
        .collect();

    let acroform_id = doc.add_object(dictionary! {
        "Fields" => field_ids,
    });
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
        "AcroForm" => acroform_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("failed to save template");
    buf
}

fn write_template(dir: &std::path::Path) -> PathBuf {
    let path = dir.join("blank.pdf");
    std::fs::write(&path, demo_template()).unwrap();
    path
}

fn test_config(tmp: &tempfile::TempDir, template_path: PathBuf) -> AppConfig {
    AppConfig {
        template_source: TemplateSource::Path {
            path: template_path,
        },
        cache_dir: tmp.path().join("cache"),
        download_dir: tmp.path().join("downloads"),
        max_download_bytes: 10 * 1024 * 1024,
    }
}

fn field_value(data: &[u8], name: &str) -> Option<String> {
    list_fields(data)
        .unwrap()
        .into_iter()
        .find(|f| f.name == name)
        .and_then(|f| f.value)
}

fn demo_user() -> UserData {
    UserData {
        first_name: "Nur".to_string(),
        last_name: "Fahmi".to_string(),
        email: "hello@rfahmi.com".to_string(),
        phone_area: "+62".to_string(),
        phone_number: "8121328512".to_string(),
    }
}

#[tokio::test]
async fn test_generate_fills_all_demo_fields() {
    let tmp = tempfile::tempdir().unwrap();
    let template_path = write_template(tmp.path());
    let config = test_config(&tmp, template_path);

    let filled_path = generate(&config, &demo_user())
        .await
        .expect("generate should produce a document");

    let filled = std::fs::read(&filled_path).unwrap();
    assert_eq!(field_value(&filled, "name[first]").as_deref(), Some("Nur"));
    assert_eq!(field_value(&filled, "name[last]").as_deref(), Some("Fahmi"));
    assert_eq!(
        field_value(&filled, "email").as_deref(),
        Some("hello@rfahmi.com")
    );
    assert_eq!(field_value(&filled, "phone[area]").as_deref(), Some("+62"));
    assert_eq!(
        field_value(&filled, "phone[phone]").as_deref(),
        Some("8121328512")
    );
}

#[tokio::test]
async fn test_fetch_twice_is_idempotent() {
    let tmp = tempfile::tempdir().unwrap();
    let template_path = write_template(tmp.path());
    let source_bytes = std::fs::read(&template_path).unwrap();
    let config = test_config(&tmp, template_path);

    let first = store_template_cache(&config).await.unwrap();
    assert_eq!(std::fs::read(&first).unwrap(), source_bytes);

    let second = store_template_cache(&config).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(std::fs::read(&second).unwrap(), source_bytes);
}

#[tokio::test]
async fn test_generate_twice_leaves_one_output_with_second_values() {
    let tmp = tempfile::tempdir().unwrap();
    let template_path = write_template(tmp.path());
    let config = test_config(&tmp, template_path);

    let first_run = generate(&config, &demo_user()).await.unwrap();

    let mut second_user = demo_user();
    second_user.email = "second@run.com".to_string();
    let second_run = generate(&config, &second_user).await.unwrap();

    assert_eq!(first_run, second_run);
    let filled = std::fs::read(&second_run).unwrap();
    assert_eq!(
        field_value(&filled, "email").as_deref(),
        Some("second@run.com")
    );

    let outputs = std::fs::read_dir(&config.cache_dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name() == "filled.pdf")
        .count();
    assert_eq!(outputs, 1);
}

#[tokio::test]
async fn test_download_copies_byte_identical() {
    let tmp = tempfile::tempdir().unwrap();
    let template_path = write_template(tmp.path());
    let config = test_config(&tmp, template_path);

    let filled_path = generate(&config, &demo_user()).await.unwrap();
    let dest = download(&config, &filled_path, "PDF_Download.pdf").unwrap();

    assert_eq!(dest, config.download_dir.join("PDF_Download.pdf"));
    assert_eq!(
        std::fs::read(&dest).unwrap(),
        std::fs::read(&filled_path).unwrap()
    );
}

#[tokio::test]
async fn test_unreachable_url_does_not_crash() {
    let tmp = tempfile::tempdir().unwrap();
    let config = AppConfig {
        template_source: TemplateSource::Url {
            url: "http://127.0.0.1:9/template.pdf".to_string(),
        },
        cache_dir: tmp.path().join("cache"),
        download_dir: tmp.path().join("downloads"),
        max_download_bytes: 1024,
    };

    assert!(generate(&config, &demo_user()).await.is_none());
    assert!(!config.cache_dir.join("template.pdf").exists());
    assert!(!config.cache_dir.join("filled.pdf").exists());
}

#[test]
fn test_list_fields_reports_demo_inventory() {
    let template = demo_template();
    let fields = list_fields(&template).unwrap();

    let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "name[first]",
            "name[last]",
            "email",
            "phone[area]",
            "phone[phone]"
        ]
    );
    assert!(fields.iter().all(|f| f.field_type == "text"));
    assert!(fields.iter().all(|f| f.value.is_none()));
}

#[rstest]
#[case("email", "a@b.com")]
#[case("name[first]", "Ayu")]
#[case("phone[area]", "+44")]
fn test_fill_single_mapping_entry(#[case] field: &str, #[case] value: &str) {
    let template = demo_template();
    let mapping = FieldMapping::from([(field.to_string(), value.to_string())]);

    let (output, report) = fill_text_fields(&template, &mapping).unwrap();

    assert_eq!(report.fields_filled, 1);
    assert_eq!(field_value(&output, field).as_deref(), Some(value));
}

#[test]
fn test_fill_unknown_key_leaves_known_fields_alone() {
    let template = demo_template();
    let mapping = FieldMapping::from([
        ("email".to_string(), "a@b.com".to_string()),
        ("not_in_template".to_string(), "dropped".to_string()),
    ]);

    let (output, report) = fill_text_fields(&template, &mapping).unwrap();

    assert_eq!(report.fields_filled, 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].name, "not_in_template");
    assert_eq!(field_value(&output, "email").as_deref(), Some("a@b.com"));
    assert_eq!(field_value(&output, "name[first]"), None);
}

#[test]
fn test_cache_paths_are_fixed() {
    let tmp = tempfile::tempdir().unwrap();
    let cache = TemplateCache::new(tmp.path());
    assert_eq!(cache.template_path(), tmp.path().join("template.pdf"));
    assert_eq!(cache.filled_path(), tmp.path().join("filled.pdf"));
}
