//! JSON, JSON Lines and xz-compressed JSON load/dump.
//!
//! `indent: None` writes compact JSON, `Some(n)` pretty-prints with `n` spaces.
//! JSONL is one compact value per line; blank lines are skipped when loading.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use xz2::read::XzDecoder;
use xz2::write::XzEncoder;

use super::{io_err, Error, Result};

/// xz preset used for `.json.xz` output.
const XZ_LEVEL: u32 = 6;

pub fn loads_json<T: DeserializeOwned>(s: &str) -> Result<T> {
    Ok(serde_json::from_str(s)?)
}

pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(io_err(path))?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

pub fn dumps_json<T: Serialize + ?Sized>(value: &T, indent: Option<usize>) -> Result<String> {
    match indent {
        None => Ok(serde_json::to_string(value)?),
        Some(2) => Ok(serde_json::to_string_pretty(value)?),
        Some(_) => {
            let mut out = Vec::new();
            write_json(&mut out, value, indent)?;
            String::from_utf8(out).map_err(|e| Error::Json(serde::ser::Error::custom(e)))
        }
    }
}

pub fn dump_json<T: Serialize + ?Sized>(value: &T, path: &Path, indent: Option<usize>) -> Result<()> {
    let file = File::create(path).map_err(io_err(path))?;
    let mut w = BufWriter::new(file);
    write_json(&mut w, value, indent)?;
    w.flush().map_err(io_err(path))
}

fn write_json<W: Write, T: Serialize + ?Sized>(w: W, value: &T, indent: Option<usize>) -> Result<()> {
    match indent {
        None => serde_json::to_writer(w, value)?,
        Some(n) => {
            let spaces = vec![b' '; n];
            let formatter = serde_json::ser::PrettyFormatter::with_indent(&spaces);
            let mut ser = serde_json::Serializer::with_formatter(w, formatter);
            value.serialize(&mut ser)?;
        }
    }
    Ok(())
}

pub fn loads_jsonl<T: DeserializeOwned>(s: &str) -> Result<Vec<T>> {
    read_jsonl(s.as_bytes(), Path::new("<string>"))
}

pub fn load_jsonl<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path).map_err(io_err(path))?;
    read_jsonl(BufReader::new(file), path)
}

fn read_jsonl<R: BufRead, T: DeserializeOwned>(reader: R, path: &Path) -> Result<Vec<T>> {
    let mut values = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(io_err(path))?;
        if line.trim().is_empty() {
            continue;
        }
        let value = serde_json::from_str(&line).map_err(|source| Error::JsonLine {
            line: idx + 1,
            source,
        })?;
        values.push(value);
    }
    Ok(values)
}

pub fn dumps_jsonl<T: Serialize>(values: &[T]) -> Result<String> {
    let mut out = String::new();
    for v in values {
        out.push_str(&serde_json::to_string(v)?);
        out.push('\n');
    }
    Ok(out)
}

pub fn dump_jsonl<T: Serialize>(values: &[T], path: &Path) -> Result<()> {
    let file = File::create(path).map_err(io_err(path))?;
    let mut w = BufWriter::new(file);
    for v in values {
        serde_json::to_writer(&mut w, v)?;
        w.write_all(b"\n").map_err(io_err(path))?;
    }
    w.flush().map_err(io_err(path))
}

pub fn load_json_xz<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(io_err(path))?;
    let mut text = String::new();
    XzDecoder::new(BufReader::new(file))
        .read_to_string(&mut text)
        .map_err(io_err(path))?;
    loads_json(&text)
}

pub fn dump_json_xz<T: Serialize + ?Sized>(
    value: &T,
    path: &Path,
    indent: Option<usize>,
) -> Result<()> {
    let file = File::create(path).map_err(io_err(path))?;
    let mut enc = XzEncoder::new(BufWriter::new(file), XZ_LEVEL);
    write_json(&mut enc, value, indent)?;
    let mut inner = enc.finish().map_err(io_err(path))?;
    inner.flush().map_err(io_err(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        name: String,
        size: u64,
    }

    #[test]
    fn dumps_compact_and_indented() {
        let v = json!({"a": [1, 2]});
        assert_eq!(dumps_json(&v, None).unwrap(), r#"{"a":[1,2]}"#);
        assert_eq!(
            dumps_json(&v, Some(2)).unwrap(),
            "{\n  \"a\": [\n    1,\n    2\n  ]\n}"
        );
        assert!(dumps_json(&v, Some(4)).unwrap().contains("\n    \"a\""));
    }

    #[test]
    fn dumps_propagates_serialize_errors() {
        // Tuple keys have no JSON object-key form.
        let mut m = std::collections::BTreeMap::new();
        m.insert((1, 2), "x");
        for indent in [None, Some(2), Some(3)] {
            let err = dumps_json(&m, indent).unwrap_err();
            assert!(matches!(err, Error::Json(_)), "indent {:?}", indent);
        }
    }

    #[test]
    fn file_roundtrip_typed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entry.json");
        let e = Entry {
            name: "disk.img".into(),
            size: 42,
        };
        dump_json(&e, &path, Some(2)).unwrap();
        let back: Entry = load_json(&path).unwrap();
        assert_eq!(back, e);
    }

    #[test]
    fn load_missing_file_reports_path() {
        let err = load_json::<serde_json::Value>(Path::new("/definitely/missing.json")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("/definitely/missing.json"));
    }

    #[test]
    fn parse_error_is_json_error() {
        let err = loads_json::<serde_json::Value>("{not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn jsonl_string_roundtrip_and_blank_lines() {
        let values = vec![json!({"x": 1}), json!([true, null]), json!("s")];
        let text = dumps_jsonl(&values).unwrap();
        assert_eq!(text, "{\"x\":1}\n[true,null]\n\"s\"\n");
        let padded = format!("\n{}\n\n", text);
        let back: Vec<serde_json::Value> = loads_jsonl(&padded).unwrap();
        assert_eq!(back, values);
    }

    #[test]
    fn jsonl_error_reports_line_number() {
        let err = loads_jsonl::<serde_json::Value>("1\n2\n{oops\n").unwrap_err();
        match err {
            Error::JsonLine { line, .. } => assert_eq!(line, 3),
            other => panic!("expected JsonLine, got {:?}", other),
        }
    }

    #[test]
    fn jsonl_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entries.jsonl");
        let entries = vec![
            Entry {
                name: "a".into(),
                size: 1,
            },
            Entry {
                name: "b".into(),
                size: 2,
            },
        ];
        dump_jsonl(&entries, &path).unwrap();
        let back: Vec<Entry> = load_jsonl(&path).unwrap();
        assert_eq!(back, entries);
    }

    #[test]
    fn xz_roundtrip_is_compressed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.json.xz");
        let v: Vec<u32> = (0..10_000).map(|i| i % 7).collect();
        dump_json_xz(&v, &path, None).unwrap();
        let raw = std::fs::read(&path).unwrap();
        assert_eq!(&raw[..6], &[0xFD, b'7', b'z', b'X', b'Z', 0x00]);
        assert!(raw.len() < dumps_json(&v, None).unwrap().len());
        let back: Vec<u32> = load_json_xz(&path).unwrap();
        assert_eq!(back, v);
    }
}
