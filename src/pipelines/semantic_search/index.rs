//! A small on-disk document index: the documents as a JSON array and their
//! embeddings as CSV, one row per document under a header of column indices.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::Serialize;

use super::similarity::{semantic_search, Hit};
use crate::core::CoachError;

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentIndex {
    documents: Vec<String>,
    embeddings: Vec<Vec<f32>>,
}

impl DocumentIndex {
    pub fn new(documents: Vec<String>, embeddings: Vec<Vec<f32>>) -> anyhow::Result<Self> {
        if documents.len() != embeddings.len() {
            return Err(CoachError::InvalidEmbeddings(format!(
                "{} documents but {} embedding rows",
                documents.len(),
                embeddings.len()
            ))
            .into());
        }
        Ok(Self {
            documents,
            embeddings,
        })
    }

    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    pub fn embeddings(&self) -> &[Vec<f32>] {
        &self.embeddings
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// The `top_k` documents closest to `query` by cosine similarity.
    pub fn search(&self, query: &[f32], top_k: usize) -> anyhow::Result<Vec<(Hit, &str)>> {
        let hits = semantic_search(query, &self.embeddings, top_k)?;
        Ok(hits
            .into_iter()
            .map(|hit| (hit, self.documents[hit.corpus_id].as_str()))
            .collect())
    }

    pub fn save(&self, docs_path: &Path, embeddings_path: &Path) -> anyhow::Result<()> {
        let mut docs = BufWriter::new(File::create(docs_path)?);
        write_documents(&mut docs, &self.documents)?;
        docs.flush()?;

        let mut csv = BufWriter::new(File::create(embeddings_path)?);
        write_embeddings_csv(&mut csv, &self.embeddings)?;
        csv.flush()?;

        tracing::info!(
            documents = %docs_path.display(),
            embeddings = %embeddings_path.display(),
            rows = self.len(),
            "saved document index"
        );
        Ok(())
    }

    pub fn load(docs_path: &Path, embeddings_path: &Path) -> anyhow::Result<Self> {
        let documents: Vec<String> = serde_json::from_reader(BufReader::new(open(docs_path)?))?;
        let embeddings = read_embeddings_csv(open(embeddings_path)?)?;
        Self::new(documents, embeddings)
    }
}

fn open(path: &Path) -> anyhow::Result<File> {
    if !path.is_file() {
        return Err(CoachError::MissingFile {
            path: path.to_path_buf(),
        }
        .into());
    }
    Ok(File::open(path)?)
}

/// JSON array indented by four spaces.
pub fn write_documents<W: Write>(writer: W, documents: &[String]) -> anyhow::Result<()> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    documents.serialize(&mut serializer)?;
    Ok(())
}

pub fn write_embeddings_csv<W: Write>(mut writer: W, rows: &[Vec<f32>]) -> anyhow::Result<()> {
    let dim = rows.first().map_or(0, Vec::len);
    let header: Vec<String> = (0..dim).map(|i| i.to_string()).collect();
    writeln!(writer, "{}", header.join(","))?;
    for row in rows {
        let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        writeln!(writer, "{}", cells.join(","))?;
    }
    Ok(())
}

pub fn read_embeddings_csv<R: Read>(reader: R) -> anyhow::Result<Vec<Vec<f32>>> {
    let mut lines = BufReader::new(reader).lines();
    let dim = match lines.next() {
        Some(header) => header?.split(',').filter(|c| !c.trim().is_empty()).count(),
        None => return Ok(Vec::new()),
    };

    let mut rows = Vec::new();
    for (index, line) in lines.enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let row = line
            .split(',')
            .map(|cell| {
                cell.trim().parse::<f32>().map_err(|e| {
                    CoachError::InvalidEmbeddings(format!("row {index}: '{cell}': {e}"))
                })
            })
            .collect::<Result<Vec<f32>, _>>()?;
        if row.len() != dim {
            return Err(CoachError::InvalidEmbeddings(format!(
                "row {index} has {} columns, header has {dim}",
                row.len()
            ))
            .into());
        }
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_has_index_header() {
        let mut out = Vec::new();
        write_embeddings_csv(&mut out, &[vec![0.5, -1.25, 3.0], vec![0.0, 1.0, 2.0]]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "0,1,2\n0.5,-1.25,3\n0,1,2\n");
    }

    #[test]
    fn csv_reads_back_what_it_wrote() {
        let rows = vec![vec![0.012345678, -0.9], vec![1e-7, 42.0]];
        let mut out = Vec::new();
        write_embeddings_csv(&mut out, &rows).unwrap();
        assert_eq!(read_embeddings_csv(out.as_slice()).unwrap(), rows);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = read_embeddings_csv("0,1\n0.1,0.2\n0.3\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("row 1 has 1 columns"));
    }

    #[test]
    fn non_numeric_cells_are_rejected() {
        assert!(read_embeddings_csv("0,1\n0.1,abc\n".as_bytes()).is_err());
    }

    #[test]
    fn documents_are_four_space_indented() {
        let mut out = Vec::new();
        write_documents(&mut out, &["Take a 3 point shot".to_string()]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[\n    \"Take a 3 point shot\"\n]");
    }

    #[test]
    fn row_count_must_match_documents() {
        assert!(DocumentIndex::new(vec!["a".into(), "b".into()], vec![vec![1.0]]).is_err());
    }

    #[test]
    fn save_load_and_search() {
        let dir = tempfile::tempdir().unwrap();
        let docs_path = dir.path().join("team_messages.json");
        let csv_path = dir.path().join("team_messages_embeddings.csv");

        let index = DocumentIndex::new(
            vec!["layup".into(), "slam dunk".into(), "shot clock".into()],
            vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.7, 0.7]],
        )
        .unwrap();
        index.save(&docs_path, &csv_path).unwrap();

        let loaded = DocumentIndex::load(&docs_path, &csv_path).unwrap();
        assert_eq!(loaded, index);

        let hits = loaded.search(&[0.1, 0.9], 5).unwrap();
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].1, "slam dunk");
    }

    #[test]
    fn missing_files_name_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = DocumentIndex::load(&dir.path().join("nope.json"), &dir.path().join("nope.csv"))
            .unwrap_err();
        assert!(matches!(err.downcast_ref::<CoachError>(), Some(CoachError::MissingFile { .. })));
    }
}
