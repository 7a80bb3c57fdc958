//! Loading every stockline of a yard.

use crate::config::YardConfig;
use crate::error::Result;
use crate::pipeline::{Pipeline, Surface};
use crate::source::ByteSource;
use crate::worker::{self, PipelineTask};

/// One configured stockline: its pipeline and the key of its height stream.
#[derive(Debug, Clone)]
pub struct YardEntry {
    pub pipeline: Pipeline,
    pub source: String,
}

/// A validated set of stocklines.
#[derive(Debug, Clone, Default)]
pub struct Yard {
    entries: Vec<YardEntry>,
}

impl Yard {
    /// Validate every stockline in `config`.
    ///
    /// # Errors
    ///
    /// Returns the first configuration error.
    pub fn from_config(config: YardConfig) -> Result<Self> {
        let entries = config
            .stocklines
            .into_iter()
            .map(|stockline| {
                Ok(YardEntry {
                    pipeline: stockline.pipeline()?,
                    source: stockline.source,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    #[must_use]
    pub fn entries(&self) -> &[YardEntry] {
        &self.entries
    }

    /// Build every stockline, in configuration order.
    ///
    /// All pipelines are started before any is awaited, so they run
    /// concurrently. A failing stockline yields an `Err` entry and does not
    /// affect the others.
    pub async fn load<S: ByteSource>(&self, source: &S) -> Vec<(String, Result<Surface>)> {
        tracing::info!(stocklines = self.entries.len(), "Loading yard");

        let mut pending: Vec<(String, Result<PipelineTask>)> =
            Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            let task = match source.fetch(&entry.source).await {
                Ok(bytes) => worker::spawn(entry.pipeline.clone(), bytes),
                Err(e) => Err(e),
            };
            pending.push((entry.pipeline.name.clone(), task));
        }

        let mut surfaces = Vec::with_capacity(pending.len());
        for (name, task) in pending {
            let result = match task {
                Ok(task) => task.finish().await,
                Err(e) => Err(e),
            };
            if let Err(e) = &result {
                tracing::warn!(name = %name, "Stockline failed: {e}");
            }
            surfaces.push((name, result));
        }
        surfaces
    }
}

/// Fetch one stockline's height stream and build it on a worker thread.
///
/// # Errors
///
/// Returns an error if the fetch, the worker or the pipeline fails.
pub async fn load_stockline<S: ByteSource + ?Sized>(
    pipeline: Pipeline,
    key: &str,
    source: &S,
) -> Result<Surface> {
    let bytes = source.fetch(key).await?;
    tracing::debug!(name = %pipeline.name, key, bytes = bytes.len(), "Fetched height stream");
    worker::spawn(pipeline, bytes)?.finish().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StocklineConfig;
    use crate::error::Error;
    use crate::source::MemorySource;
    use crate::source::tests::block_on;

    fn encode(values: &[f32]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    fn stockline(name: &str, source: &str) -> StocklineConfig {
        StocklineConfig {
            name: name.to_string(),
            source: source.to_string(),
            width: 3,
            depth: 2,
            ..StocklineConfig::default()
        }
    }

    #[test]
    fn test_from_config_rejects_invalid_stockline() {
        let config = YardConfig {
            stocklines: vec![
                stockline("A", "a"),
                StocklineConfig {
                    width: 0,
                    ..stockline("B", "b")
                },
            ],
        };
        assert!(matches!(Yard::from_config(config), Err(Error::Mesh(_))));
    }

    #[test]
    fn test_load_in_config_order() {
        let source = MemorySource::new();
        source.insert("a", encode(&[1.0; 6]));
        source.insert("c", encode(&[2.0; 6]));

        let config = YardConfig {
            stocklines: vec![
                stockline("A", "a"),
                stockline("B", "missing"),
                stockline("C", "c"),
            ],
        };
        let yard = Yard::from_config(config).unwrap();
        assert_eq!(yard.entries().len(), 3);

        let results = block_on(yard.load(&source));
        let names: Vec<_> = results.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);

        assert_eq!(results[0].1.as_ref().unwrap().mesh.triangle_count(), 4);
        assert!(matches!(results[1].1, Err(Error::Source { .. })));
        assert!(results[2].1.is_ok());
    }

    #[test]
    fn test_load_stockline() {
        let source = MemorySource::new();
        source.insert("grid", encode(&[0.5; 6]));
        let pipeline = stockline("A", "grid").pipeline().unwrap();
        let surface = block_on(load_stockline(pipeline, "grid", &source)).unwrap();
        assert_eq!(surface.name, "A");
        assert_eq!(surface.mesh.vertex_count(), 6);
    }
}
