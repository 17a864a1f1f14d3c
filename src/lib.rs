// Library root
// -----------
// The binary (`main.rs`) parses flags, builds a `WikiClient` and hands it
// to the interactive loop in `ui`.
//
// Module responsibilities:
// - `api`: blocking HTTP calls to the search and article endpoints.
// - `model`: typed decoding of the two JSON responses.
// - `render`: colours, result listing and article highlighting.
// - `output`: writing an article to a file.
// - `prompt`: reading answers from a terminal or piped stdin.
// - `config`: command line flags.
// - `ui`: the search -> select -> read loop.
pub mod api;
pub mod config;
pub mod model;
pub mod output;
pub mod prompt;
pub mod render;
pub mod ui;
