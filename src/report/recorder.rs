//! Run recorder writing the fitness stream to any `io::Write`.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::schema::{EvolutionPhase, GenerationReport};

/// Summary returned when a recorder is finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecorderStats {
    /// Generation sections written, the initial population included.
    pub generations: usize,
    /// Fitness lines written.
    pub fitness_lines: u64,
}

/// Writes one section per generation report.
///
/// Usage:
/// ```ignore
/// let mut recorder = RunRecorder::create("robots.txt")?;
/// let result = engine.run_with_callback(|report| recorder.record(report).unwrap());
/// recorder.finish()?;
/// ```
pub struct RunRecorder<W: Write> {
    writer: W,
    generations: usize,
    fitness_lines: u64,
}

impl RunRecorder<BufWriter<File>> {
    /// Create a recorder writing to a new file at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> RunRecorder<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            generations: 0,
            fitness_lines: 0,
        }
    }

    /// Append the section for `report`.
    ///
    /// A report with a terminal phase is followed by a final section
    /// repeating the last population.
    pub fn record(&mut self, report: &GenerationReport) -> io::Result<()> {
        if self.generations == 0 {
            writeln!(self.writer, "Initial Fitness:")?;
        } else {
            writeln!(self.writer, "Fitness Generation[{}]:", report.generation)?;
            writeln!(self.writer, "Fittest Phenotype: {}", report.best.phenotype)?;
        }
        self.write_fitness(&report.fitness)?;
        self.generations += 1;

        if matches!(
            report.phase,
            EvolutionPhase::Converged | EvolutionPhase::Stopped
        ) {
            writeln!(
                self.writer,
                "Final Fitness Generation[{}]:",
                report.generation
            )?;
            writeln!(self.writer, "Fittest Phenotype: {}", report.best.phenotype)?;
            self.write_fitness(&report.fitness)?;
        }

        Ok(())
    }

    fn write_fitness(&mut self, fitness: &[f64]) -> io::Result<()> {
        for value in fitness {
            writeln!(self.writer, "{}", value)?;
        }
        self.fitness_lines += fitness.len() as u64;
        Ok(())
    }

    /// Flush and return summary statistics.
    pub fn finish(mut self) -> io::Result<RecorderStats> {
        self.writer.flush()?;
        Ok(RecorderStats {
            generations: self.generations,
            fitness_lines: self.fitness_lines,
        })
    }

    /// Consume the recorder and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Write the solution file: the phenotype and nothing else.
pub fn write_solution<P: AsRef<Path>>(path: P, phenotype: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(phenotype.as_bytes())?;
    file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::Outcome;
    use crate::schema::{Position, RobotSnapshot};
    use std::fs;
    use tempfile::tempdir;

    fn report(generation: usize, fitness: Vec<f64>, phase: EvolutionPhase) -> GenerationReport {
        GenerationReport {
            generation,
            best: RobotSnapshot {
                genotype: "000111".to_string(),
                phenotype: "FRS".to_string(),
                fitness: fitness[0],
                outcome: Outcome::Stopped,
                moves_made: 3,
                final_position: Position::new(2, 1),
            },
            avg_fitness: fitness.iter().sum::<f64>() / fitness.len() as f64,
            best_fitness: fitness[0],
            stagnation_count: 0,
            fitness,
            phase,
        }
    }

    #[test]
    fn test_record_stream_layout() {
        let mut recorder = RunRecorder::new(Vec::new());
        recorder
            .record(&report(0, vec![0.5, 0.25], EvolutionPhase::Evolving))
            .unwrap();
        recorder
            .record(&report(1, vec![1.0, 0.5], EvolutionPhase::Converged))
            .unwrap();

        let text = String::from_utf8(recorder.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Initial Fitness:",
                "0.5",
                "0.25",
                "Fitness Generation[1]:",
                "Fittest Phenotype: FRS",
                "1",
                "0.5",
                "Final Fitness Generation[1]:",
                "Fittest Phenotype: FRS",
                "1",
                "0.5",
            ]
        );
    }

    #[test]
    fn test_recorder_file_and_stats() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("robots.txt");

        let mut recorder = RunRecorder::create(&path).unwrap();
        for generation in 0..3 {
            let phase = if generation == 2 {
                EvolutionPhase::Stopped
            } else {
                EvolutionPhase::Evolving
            };
            recorder
                .record(&report(generation, vec![0.3, 0.2, 0.1], phase))
                .unwrap();
        }

        let stats = recorder.finish().unwrap();
        assert_eq!(stats.generations, 3);
        assert_eq!(stats.fitness_lines, 12);

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("Initial Fitness:\n"));
        assert!(text.contains("Final Fitness Generation[2]:"));
    }

    #[test]
    fn test_write_solution() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("solution.txt");
        write_solution(&path, "FFRS").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "FFRS");
    }
}
