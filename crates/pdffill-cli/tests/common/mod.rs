//! Shared fixtures for CLI integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use lopdf::{Object, StringFormat, dictionary};

pub fn cmd() -> Command {
    Command::cargo_bin("pdf-fill-form").unwrap()
}

fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// A one-page form with a text field `name`, a checkbox `agree` and a radio
/// button `gender`, in that widget order.
pub fn form_pdf(name: &str, agree: bool) -> Vec<u8> {
    let mut doc = lopdf::Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let page_id = doc.new_object_id();

    let name_id = doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "Widget",
        "T" => Object::string_literal("name"),
        "FT" => "Tx",
        "V" => text_string(name),
        "Rect" => vec![50.into(), 700.into(), 250.into(), 720.into()],
        "P" => Object::Reference(page_id),
    });
    let state = if agree { "Yes" } else { "Off" };
    let agree_id = doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "Widget",
        "T" => Object::string_literal("agree"),
        "FT" => "Btn",
        "V" => state,
        "AS" => state,
        "AP" => dictionary! {
            "N" => dictionary! {
                "Yes" => Object::Null,
                "Off" => Object::Null,
            },
        },
        "Rect" => vec![50.into(), 650.into(), 70.into(), 670.into()],
        "P" => Object::Reference(page_id),
    });
    let gender_id = doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "Widget",
        "T" => Object::string_literal("gender"),
        "FT" => "Btn",
        "Ff" => Object::Integer(49152),
        "V" => "Off",
        "Rect" => vec![50.into(), 600.into(), 70.into(), 620.into()],
        "P" => Object::Reference(page_id),
    });

    doc.objects.insert(
        page_id,
        Object::Dictionary(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Annots" => vec![
                Object::Reference(name_id),
                Object::Reference(agree_id),
                Object::Reference(gender_id),
            ],
        }),
    );
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => Object::Integer(1),
        }),
    );

    let acroform_id = doc.add_object(dictionary! {
        "Fields" => vec![
            Object::Reference(name_id),
            Object::Reference(agree_id),
            Object::Reference(gender_id),
        ],
    });
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
        "AcroForm" => Object::Reference(acroform_id),
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("failed to save test PDF");
    buf
}

/// Write the default form (`name` empty, `agree` off) into `dir`.
pub fn write_form(dir: &Path) -> PathBuf {
    let path = dir.join("form.pdf");
    std::fs::write(&path, form_pdf("", false)).unwrap();
    path
}

/// Run extract mode on `pdf` and parse its JSON output.
pub fn extract_json(pdf: &Path) -> serde_json::Value {
    let output = cmd().arg(pdf).output().unwrap();
    assert!(output.status.success(), "extract failed: {output:?}");
    serde_json::from_slice(&output.stdout).unwrap()
}

/// Stand-ins for the poppler tools. Each appends its argument list to the
/// file named by `$FAKE_TOOL_LOG`.
#[cfg(unix)]
pub mod fake_tools {
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    /// Copies the first input to the output, and every input into
    /// `$FAKE_TOOL_LOG.inputs/` numbered from 1.
    pub const UNITE: &str = "#!/bin/sh\n\
        echo \"pdfunite $*\" >> \"$FAKE_TOOL_LOG\"\n\
        mkdir -p \"$FAKE_TOOL_LOG.inputs\"\n\
        n=0\n\
        for last; do\n\
          n=$((n + 1))\n\
          if [ \"$n\" -lt \"$#\" ]; then cp \"$last\" \"$FAKE_TOOL_LOG.inputs/$n.pdf\"; fi\n\
        done\n\
        cp \"$1\" \"$last\"\n";

    /// Copies its input to the output.
    pub const CAIRO: &str = "#!/bin/sh\n\
        echo \"pdftocairo $*\" >> \"$FAKE_TOOL_LOG\"\n\
        cp \"$2\" \"$3\"\n";

    pub const FAIL: &str = "#!/bin/sh\n\
        echo \"fail $*\" >> \"$FAKE_TOOL_LOG\"\n\
        exit 3\n";

    pub fn install(dir: &Path, name: &str, script: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    /// Inputs the fake `pdfunite` received, in argument order.
    pub fn united_inputs(log: &Path) -> Vec<PathBuf> {
        let mut dir = log.as_os_str().to_owned();
        dir.push(".inputs");
        let mut inputs: Vec<PathBuf> = std::fs::read_dir(dir)
            .map(|entries| entries.map(|entry| entry.unwrap().path()).collect())
            .unwrap_or_default();
        inputs.sort_by_key(|path| {
            path.file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.parse::<usize>().ok())
        });
        inputs
    }

    /// Logged invocations, one line per tool run.
    pub fn calls(log: &Path) -> Vec<String> {
        std::fs::read_to_string(log)
            .map(|text| text.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }
}
