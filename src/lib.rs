//! # Flowlens: Workflow Graph Validation & Analytics
//!
//! Flowlens takes the raw node-and-edge graphs behind visual LLM-agent
//! workflow builders and answers two questions about them, without ever
//! executing anything:
//!
//! - **Is this graph structurally sound?** Two validation contracts: a
//!   permissive definition-shape check for editors, and a strict
//!   execution-readiness gate.
//! - **What is this graph like?** Complexity metrics, bottleneck and risk
//!   findings, execution-path counts, and rule-based optimization advice,
//!   with optional content-addressed caching of the whole report.
//!
//! The engine is a pure function of `(nodes, edges, config)`. It performs
//! no I/O; persistence, HTTP, auth, and workflow execution are external
//! collaborators that hand graphs in and get structured results back.
//!
//! ## Validating a definition
//!
//! ```
//! use flowlens::definition::{EdgeSpec, NodeSpec, WorkflowDefinition};
//! use flowlens::{validate_definition, validate_for_execution};
//!
//! let nodes = vec![
//!     NodeSpec::new("entry", "start"),
//!     NodeSpec::new("agent", "model"),
//! ];
//! let edges = vec![EdgeSpec::new("e1", "entry", "agent")];
//!
//! // Editor-grade shape check over the whole document.
//! let definition = WorkflowDefinition::new("triage", nodes.clone(), edges.clone());
//! let shape = validate_definition(&definition);
//! assert!(shape.is_valid);
//!
//! // Pre-execution gate over the bare graph.
//! let readiness = validate_for_execution(&nodes, &edges);
//! assert!(readiness.is_executable());
//! ```
//!
//! ## Analyzing a workflow
//!
//! ```
//! use flowlens::definition::{EdgeSpec, NodeSpec};
//! use flowlens::engine::WorkflowAnalyzer;
//!
//! let nodes = vec![
//!     NodeSpec::new("entry", "start"),
//!     NodeSpec::new("lookup", "retrieval"),
//!     NodeSpec::new("answer", "model"),
//! ];
//! let edges = vec![
//!     EdgeSpec::new("e1", "entry", "lookup"),
//!     EdgeSpec::new("e2", "lookup", "answer"),
//! ];
//!
//! let report = WorkflowAnalyzer::new().analyze(&nodes, &edges);
//! assert_eq!(report.complexity.depth, 3);
//! assert_eq!(report.execution_paths, 1);
//! ```
//!
//! ## Caching reports
//!
//! The analyzer accepts any [`cache::AnalyticsCache`] backend; reports are
//! keyed by a canonical content hash, so reordering nodes or moving them
//! around the canvas does not invalidate an entry. Backend failures are
//! absorbed: the pipeline recomputes and the caller never sees a cache
//! error.
//!
//! ```
//! use std::sync::Arc;
//! use flowlens::cache::InMemoryCache;
//! use flowlens::definition::NodeSpec;
//! use flowlens::engine::WorkflowAnalyzer;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let analyzer = WorkflowAnalyzer::new().with_cache(Arc::new(InMemoryCache::new()));
//! let nodes = vec![NodeSpec::new("entry", "start")];
//! let first = analyzer.analyze_cached(&nodes, &[]).await;
//! let second = analyzer.analyze_cached(&nodes, &[]).await; // cache hit
//! assert_eq!(first, second);
//! # }
//! ```
//!
//! ## Module Guide
//!
//! - [`definition`] - Raw node/edge/workflow records as editors produce them
//! - [`graph`] - The indexed graph model every pass reads
//! - [`validation`] - Permissive and strict validation contracts
//! - [`analytics`] - Complexity, bottlenecks, paths, risks, and advice
//! - [`cache`] - Content-addressed report caching
//! - [`engine`] - The [`WorkflowAnalyzer`](engine::WorkflowAnalyzer) facade
//! - [`config`] - Tunable weights, caps, and TTLs
//! - [`telemetry`] - Tracing subscriber setup for embedders

pub mod analytics;
pub mod cache;
pub mod config;
pub mod definition;
pub mod engine;
pub mod graph;
pub mod telemetry;
pub mod types;
pub mod validation;

pub use validation::{ExecutionReadiness, ValidationResult, validate_definition, validate_for_execution};
