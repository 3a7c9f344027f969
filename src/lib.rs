//! # sora-emit
//!
//! This crate provides writers that emit generated text and, in lockstep, a source map
//! composed through every earlier transformation of that text.
//!
//! ## Getting Started
//!
//! ```
//! use sora_emit::{Origin, OutputFile, SourceMapWriter, Writer};
//!
//! // stage 1: `a.ts` becomes `a.js`
//! let mut a_js = OutputFile::new("a.js");
//! let mut writer = SourceMapWriter::new(a_js.path());
//! writer.write("let a = 1;", Some(Origin::new("a.ts", 4, 2)));
//! writer.finish(&mut a_js);
//!
//! // stage 2: `a.js` is wrapped into `bundle.js`
//! let mut bundle = OutputFile::new("bundle.js");
//! let mut writer = SourceMapWriter::new(bundle.path());
//! writer.write("(function () {\n", None);
//! writer.write(a_js.text().unwrap(), Some(a_js.origin(0, 0)));
//! writer.write("\n})();", None);
//! writer.finish(&mut bundle);
//!
//! // the bundle maps straight to `a.ts`
//! let sm = bundle.source_map().unwrap();
//! assert_eq!(sm.sources(), &["a.ts"]);
//! assert_eq!(sm.original_position((1, 0)).unwrap().0, "a.ts");
//! ```
//!
//! ## Overview
//!
//! ### `Writer`
//!
//! [Writer] is the capability shared by the writers: `write` text with an optional
//! [Origin], `indent`/`unindent`, and `finish` into an [OutputTarget].
//!
//! - [TextWriter] keeps text and indentation only.
//! - [SourceMapWriter] also builds the composed [SourceMap].
//!
//! [WriterOptions] picks one of them from configuration.
//!
//! ### `SourceMap`
//!
//! [SourceMap] is a finalized version-3 source map. It can be parsed from and
//! serialized to JSON, and serves as the [OriginMap] of text generated from its file.
//!
//! ### `GrowableBuffer`
//!
//! [GrowableBuffer] is the binary counterpart of the writers: a byte buffer with a
//! documented doubling growth.
//!
//! ### `Position`
//!
//! [Position] represents a 0-based line and 0-based column in a file.
//!
//! ### `Mapping`
//!
//! [Mapping] presents an entry of a generated line in [Mappings].
//!
//! ## Features
//!
//! - `builder` (default): Enables [SourceMapBuilder] and [Mappings::new] for manual
//!   construction of source maps.
//!

mod buffer;
mod error;
mod interner;
mod mapping;
mod mappings;
mod origin;
mod sourcemap;
mod splitter;
mod target;
mod vlq;
mod writer;

pub use buffer::*;
pub use error::*;
pub use mapping::*;
pub use mappings::*;
pub use origin::*;
pub use sourcemap::*;
pub use target::*;
pub use writer::*;
