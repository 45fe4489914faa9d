//! Integration tests driving the `detsort` binary.

mod basic_sort;
