//! Puzzle definitions: the demonstration pairs a session was solving.

use serde::Deserialize;

use super::grid::Grid;

/// A task's demonstration pairs and test inputs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Puzzle {
    pub train: Vec<TrainPair>,
    pub test: Vec<TestInput>,
}

/// One solved example: input grid and expected output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrainPair {
    pub input: Grid,
    pub output: Grid,
}

/// A test input. Any published output is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TestInput {
    pub input: Grid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_task_file_shape() {
        let json = r#"{
            "train": [{"input": [[0, 1]], "output": [[1, 0]]}],
            "test": [{"input": [[1, 1]], "output": [[1, 1]]}]
        }"#;
        let puzzle: Puzzle = serde_json::from_str(json).unwrap();

        assert_eq!(puzzle.train.len(), 1);
        assert_eq!(puzzle.train[0].output.get(0, 0), Some(1));
        assert_eq!(puzzle.test[0].input.cols(), 2);
    }
}
