// Test infrastructure
//
// Integration-style tests that exercise whole components together:
// full-file parsing, project configuration, and cross-file member-chain
// resolution over real directory trees.

pub mod resolver_tests; // Cross-file member-chain resolution
