//! Enumeration of the `2^(n-1)` contiguous compositions of a token
//! sequence into "cells" (space-joined substrings) to be matched
//! independently.

/// One composition of the query tokens into contiguous, non-empty cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringSet {
    pub cells: Vec<String>,
}

impl StringSet {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Enumerates every way of grouping `n` tokens into contiguous cells: each
/// of the `n - 1` gaps between adjacent tokens is independently either a
/// cut or not, giving `2^(n-1)` partitions. `n == 0` yields the single
/// empty partition.
pub struct StringPartitioner;

impl StringPartitioner {
    pub fn partitions(tokens: &[String]) -> Vec<StringSet> {
        let n = tokens.len();
        if n == 0 {
            return vec![StringSet { cells: Vec::new() }];
        }
        if n == 1 {
            return vec![StringSet {
                cells: vec![tokens[0].clone()],
            }];
        }

        let gap_count = n - 1;
        let mut result = Vec::with_capacity(1usize << gap_count);

        for mask in 0..(1u32 << gap_count) {
            let mut cells = Vec::new();
            let mut current = tokens[0].clone();
            for (gap, token) in tokens.iter().enumerate().skip(1) {
                let cut_before = mask & (1 << (gap - 1)) != 0;
                if cut_before {
                    cells.push(std::mem::replace(&mut current, token.clone()));
                } else {
                    current.push(' ');
                    current.push_str(token);
                }
            }
            cells.push(current);
            result.push(StringSet { cells });
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_input_yields_one_empty_partition() {
        let partitions = StringPartitioner::partitions(&[]);
        assert_eq!(partitions, vec![StringSet { cells: vec![] }]);
    }

    #[test]
    fn test_single_token_yields_one_partition() {
        let partitions = StringPartitioner::partitions(&toks(&["nice"]));
        assert_eq!(partitions.len(), 1);
        assert_eq!(partitions[0].cells, vec!["nice".to_string()]);
    }

    #[test]
    fn test_two_tokens_yields_two_partitions() {
        let partitions = StringPartitioner::partitions(&toks(&["san", "francisco"]));
        assert_eq!(partitions.len(), 2);
        assert!(partitions.contains(&StringSet {
            cells: vec!["san".to_string(), "francisco".to_string()]
        }));
        assert!(partitions.contains(&StringSet {
            cells: vec!["san francisco".to_string()]
        }));
    }

    #[rstest::rstest]
    #[case(0, 1)]
    #[case(1, 1)]
    #[case(2, 2)]
    #[case(3, 4)]
    #[case(4, 8)]
    #[case(7, 64)]
    fn test_partition_count_is_power_of_two(#[case] n: usize, #[case] expected: usize) {
        let tokens: Vec<String> = (0..n).map(|i| format!("t{i}")).collect();
        assert_eq!(StringPartitioner::partitions(&tokens).len(), expected);
    }

    #[test]
    fn test_every_partition_covers_all_tokens_in_order() {
        let tokens = toks(&["rio", "de", "janeiro"]);
        for partition in StringPartitioner::partitions(&tokens) {
            let rejoined: Vec<&str> = partition
                .cells
                .iter()
                .flat_map(|c| c.split(' '))
                .collect();
            assert_eq!(rejoined, vec!["rio", "de", "janeiro"]);
        }
    }
}
