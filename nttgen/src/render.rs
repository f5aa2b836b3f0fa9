//! Text rendering of the generated artifacts.
//!
//! Everything here works on values computed beforehand; no arithmetic on
//! the transform happens in this module.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use itertools::Itertools;

use crate::connectivity::{Connectivity, KERNEL_INSTANCE};
use crate::error::{Error, Result};
use crate::topology::PipelineTopology;

const DEFAULT_HEADER: &str = include_str!("../templates/ntt.h");
const DEFAULT_KERNEL: &str = include_str!("../templates/ntt.cpp");

/// Template text with `{NAME}` placeholders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    name: String,
    text: String,
}

impl Template {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text: String = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(path.display().to_string(), text))
    }

    /// Built-in header template.
    pub fn default_header() -> Self {
        Self::new("ntt.h", DEFAULT_HEADER)
    }

    /// Built-in kernel template.
    pub fn default_kernel() -> Self {
        Self::new("ntt.cpp", DEFAULT_KERNEL)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replaces every `{NAME}` for which a value is given in a single pass,
    /// so substituted values are never scanned again. Braces around anything
    /// that is not a supplied name are copied verbatim. Each supplied name
    /// must occur at least once.
    pub fn render(&self, values: &[(&str, String)]) -> Result<String> {
        let lookup: HashMap<&str, usize> = values
            .iter()
            .enumerate()
            .map(|(i, (name, _))| (*name, i))
            .collect();
        let mut used: Vec<bool> = vec![false; values.len()];

        let mut out: String = String::with_capacity(self.text.len());
        let mut rest: &str = &self.text;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after: &str = &rest[open + 1..];
            let ident_len: usize = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            let (ident, tail) = after.split_at(ident_len);

            match lookup.get(ident) {
                Some(&i) if tail.starts_with('}') => {
                    out.push_str(&values[i].1);
                    used[i] = true;
                    rest = &tail[1..];
                }
                _ => {
                    out.push('{');
                    rest = after;
                }
            }
        }
        out.push_str(rest);

        if let Some(i) = used.iter().position(|u| !u) {
            return Err(Error::MalformedTemplate {
                template: self.name.clone(),
                placeholder: values[i].0.to_string(),
            });
        }

        Ok(out)
    }
}

/// Memory connectivity file (`link_config.ini`).
pub fn link_config(connectivity: &Connectivity) -> String {
    std::iter::once("[connectivity]".to_string())
        .chain(connectivity.bindings().iter().map(|binding| {
            format!(
                "sp={}.{}:HBM[{}]",
                KERNEL_INSTANCE,
                binding.port_name(),
                binding.bank
            )
        }))
        .join("\n")
}

/// Values substituted into the header template.
#[derive(Clone, Debug)]
pub struct HeaderValues<'a> {
    pub data_format: String,
    pub modulus: u64,
    pub n: usize,
    pub log_n: u32,
    pub spatial_width: usize,
    pub log_b: u32,
    pub num_channels: usize,
    pub twiddles: &'a [u64],
}

pub fn header(template: &Template, values: &HeaderValues<'_>) -> Result<String> {
    template.render(&[
        ("DATA_FORMAT", values.data_format.clone()),
        ("MOD", values.modulus.to_string()),
        ("N", values.n.to_string()),
        ("log2N", values.log_n.to_string()),
        ("B", values.spatial_width.to_string()),
        ("log2B", values.log_b.to_string()),
        ("NUM_CH", values.num_channels.to_string()),
        ("TW_FACTORS", values.twiddles.iter().join(", ")),
    ])
}

/// Declarations of the streams linking consecutive temporal stages.
pub fn tapa_streams(topology: Option<&PipelineTopology>) -> String {
    let Some(topology) = topology else {
        return String::new();
    };
    topology
        .intermediate_streams()
        .iter()
        .flatten()
        .map(|stream| format!("  tapa::streams<Data, B> {stream};"))
        .chain(std::iter::once(String::new()))
        .join("\n")
}

/// Task graph invoking every temporal stage, each joined on completion.
pub fn tapa_task(topology: Option<&PipelineTopology>) -> String {
    let Some(topology) = topology else {
        return String::new();
    };
    let last: usize = topology.stage_count() - 1;
    std::iter::once("  tapa::task()".to_string())
        .chain(topology.stages().iter().map(|stage| {
            format!(
                "      .invoke<tapa::join>(ntt_temporal_stage, {}, {}, {}, {}, {}, {}){}",
                stage.index,
                stage.inputs[0],
                stage.inputs[1],
                stage.outputs[0],
                stage.outputs[1],
                stage.samples,
                if stage.index == last { ";" } else { "" }
            )
        }))
        .join("\n")
}

/// `None` renders a kernel without temporal stages.
pub fn kernel(template: &Template, topology: Option<&PipelineTopology>) -> Result<String> {
    template.render(&[
        ("TAPA_STREAMS", tapa_streams(topology)),
        ("TAPA_TASK", tapa_task(topology)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_single_pass() {
        let template = Template::new("t", "a={A} b={B} {A}");
        let out = template
            .render(&[("A", "{B}".to_string()), ("B", "2".to_string())])
            .unwrap();
        assert_eq!(out, "a={B} b=2 {B}");
    }

    #[test]
    fn render_keeps_unknown_braces() {
        let template = Template::new("t", "int x[] = { {V} }; {OTHER} {");
        let out = template.render(&[("V", "1, 2".to_string())]).unwrap();
        assert_eq!(out, "int x[] = { 1, 2 }; {OTHER} {");
    }

    #[test]
    fn render_missing_placeholder() {
        let template = Template::new("t", "{A}");
        let err = template
            .render(&[("A", "1".to_string()), ("MISSING", "2".to_string())])
            .unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedTemplate { ref template, ref placeholder }
                if template == "t" && placeholder == "MISSING"
        ));
    }

    #[test]
    fn link_config_two_channels() {
        let connectivity = Connectivity::new(2).unwrap();
        assert_eq!(
            link_config(&connectivity),
            "[connectivity]\n\
             sp=ntt_1.x_0:HBM[0]\n\
             sp=ntt_1.x_1:HBM[1]\n\
             sp=ntt_1.y_0:HBM[2]\n\
             sp=ntt_1.y_1:HBM[3]"
        );
    }

    #[test]
    fn task_graph_two_stages() {
        // log2(32) - (log2(4) + 1) = 2
        let topology = PipelineTopology::synthesize(32, 4).unwrap();
        assert_eq!(
            tapa_streams(Some(&topology)),
            "  tapa::streams<Data, B> streams1_0;\n  tapa::streams<Data, B> streams1_1;\n"
        );
        assert_eq!(
            tapa_task(Some(&topology)),
            "  tapa::task()\n\
             \x20     .invoke<tapa::join>(ntt_temporal_stage, 0, input_stream0, input_stream1, streams1_0, streams1_1, SAMPLES)\n\
             \x20     .invoke<tapa::join>(ntt_temporal_stage, 1, streams1_0, streams1_1, output_stream0, output_stream1, SAMPLES);"
        );
    }

    #[test]
    fn no_stages_renders_nothing() {
        assert_eq!(tapa_streams(None), "");
        assert_eq!(tapa_task(None), "");
        let out = kernel(&Template::new("k", "[{TAPA_STREAMS}|{TAPA_TASK}]"), None).unwrap();
        assert_eq!(out, "[|]");
    }
}
