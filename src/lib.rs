//! # AV1 Batch Converter Library
//!
//! Conversione batch di video MP4 in AV1/MKV tramite ffmpeg, con log CSV per file.
//!
//! ## Architettura dei moduli:
//! - `config`: Impostazioni dell'esecuzione e validazione della qualità
//! - `error`: Tipi di errore custom
//! - `file_manager`: Discovery dei file, controlli su directory e spazio disco
//! - `tool_resolver`: Ricerca del binario ffmpeg
//! - `ffmpeg`: Invocazione del processo esterno
//! - `encoder`: Scelta dell'encoder (NVENC o libaom-av1)
//! - `command`: Costruzione degli argomenti di ffmpeg
//! - `converter`: Orchestratore del batch, pipeline per file, path di output
//! - `conversion_log`: Log CSV persistente
//! - `progress`: Barra di avanzamento e riepilogo
//! - `json_output`: Output JSON per uso da script
//!
//! ## Utilizzo:
//! ```rust,ignore
//! use av1_batch_converter::{run_conversion, ConversionSettings};
//!
//! let settings = ConversionSettings::new("/videos/in", "/videos/out");
//! let report = run_conversion(settings).await?;
//! std::process::exit(report.exit_code() as i32);
//! ```

pub mod command;
pub mod config;
pub mod conversion_log;
pub mod converter;
pub mod encoder;
pub mod error;
pub mod ffmpeg;
pub mod file_manager;
pub mod json_output;
pub mod progress;
pub mod tool_resolver;

pub use config::{ConversionSettings, Quality};
pub use conversion_log::{ConversionLog, ConversionStatus, LogEntry};
pub use converter::{run_conversion, BatchConverter, RunReport};
pub use encoder::EncoderChoice;
pub use error::ConvertError;
pub use ffmpeg::{EncoderTool, Ffmpeg};
pub use progress::ConversionSummary;
