use std::fs;
use std::path::{Path, PathBuf};

use math::TwiddleTable;
use math::modulus::prime::RootPair;
use tracing::{debug, info, warn};

use crate::config::GeneratorConfig;
use crate::connectivity::Connectivity;
use crate::error::{Error, Result};
use crate::feasibility::ParallelismPlan;
use crate::params::TransformParameters;
use crate::render::{self, HeaderValues, Template};
use crate::topology::PipelineTopology;

pub const LINK_CONFIG_FILE: &str = "link_config.ini";
pub const HEADER_FILE: &str = "src/ntt.h";
pub const KERNEL_FILE: &str = "src/ntt.cpp";

/// Derives every parameter of one accelerator configuration and renders
/// the artifacts describing it.
#[derive(Clone, Debug)]
pub struct Generator {
    config: GeneratorConfig,
    header_template: Template,
    kernel_template: Template,
}

/// Rendered artifacts of a successful run, together with the typed values
/// they were rendered from.
#[derive(Clone, Debug)]
pub struct Artifacts {
    pub plan: ParallelismPlan,
    pub roots: RootPair<u64>,
    pub twiddles: TwiddleTable<u64>,
    pub topology: Option<PipelineTopology>,
    pub link_config: String,
    pub header: String,
    pub kernel: String,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            header_template: Template::default_header(),
            kernel_template: Template::default_kernel(),
        }
    }

    pub fn with_templates(mut self, header: Template, kernel: Template) -> Self {
        self.header_template = header;
        self.kernel_template = kernel;
        self
    }

    /// Loads `ntt.h` and `ntt.cpp` from `dir`.
    pub fn with_template_dir(self, dir: &Path) -> Result<Self> {
        let header: Template = Template::load(&dir.join("ntt.h"))?;
        let kernel: Template = Template::load(&dir.join("ntt.cpp"))?;
        Ok(self.with_templates(header, kernel))
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Validates the configuration and runs the feasibility gate.
    pub fn plan(&self) -> Result<ParallelismPlan> {
        self.config.validate()?;
        ParallelismPlan::analyze(
            self.config.num_channels,
            self.config.vector_len(),
            self.config.coeff_parallelism(),
        )
    }

    /// Runs the generator and writes the artifacts under `dir`. Nothing is
    /// written unless every artifact rendered.
    pub fn run_to(&self, dir: &Path) -> Result<Artifacts> {
        let artifacts: Artifacts = self.run()?;
        artifacts.write_to(dir)?;
        Ok(artifacts)
    }

    pub fn run(&self) -> Result<Artifacts> {
        let config: &GeneratorConfig = &self.config;

        let plan: ParallelismPlan = self.plan()?;
        info!(
            n = config.n,
            b = config.spatial_width,
            num_ch = config.num_channels,
            veclen = plan.vector_len,
            "Values used"
        );
        info!(
            num_cores = plan.num_cores,
            channels_per_core = plan.channels_per_core,
            "Parallelism plan"
        );

        let params: TransformParameters =
            TransformParameters::new(config.n, config.modulus, config.bits)?;
        let roots: RootPair<u64> = params.roots()?;
        debug!(omega = roots.omega, psi = roots.psi, q = params.modulus(), "Root pair");

        let twiddles: TwiddleTable<u64> = params.twiddle_table(&roots)?;
        debug!(len = twiddles.n(), "Twiddle table");

        let topology: Option<PipelineTopology> =
            match PipelineTopology::synthesize(config.n, config.spatial_width) {
                Ok(topology) => {
                    debug!(stages = topology.stage_count(), "Pipeline topology");
                    Some(topology)
                }
                Err(Error::NoTemporalStages { log_n, log_b }) => {
                    warn!(log_n, log_b, "No temporal stages, kernel pipeline left empty");
                    None
                }
                Err(err) => return Err(err),
            };

        let connectivity: Connectivity = Connectivity::new(config.num_channels)?;

        let link_config: String = render::link_config(&connectivity);
        let header: String = render::header(
            &self.header_template,
            &HeaderValues {
                data_format: params.coeff_type().to_string(),
                modulus: params.modulus(),
                n: params.n(),
                log_n: params.log_n(),
                spatial_width: config.spatial_width,
                log_b: config.log_b(),
                num_channels: config.num_channels,
                twiddles: twiddles.as_slice(),
            },
        )?;
        let kernel: String = render::kernel(&self.kernel_template, topology.as_ref())?;

        Ok(Artifacts {
            plan,
            roots,
            twiddles,
            topology,
            link_config,
            header,
            kernel,
        })
    }
}

impl Artifacts {
    /// Relative path and content of every artifact.
    pub fn files(&self) -> [(&'static str, &str); 3] {
        [
            (LINK_CONFIG_FILE, self.link_config.as_str()),
            (HEADER_FILE, self.header.as_str()),
            (KERNEL_FILE, self.kernel.as_str()),
        ]
    }

    /// Writes all artifacts under `dir`. On failure, files and directories
    /// created by this call are removed again.
    pub fn write_to(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        write_files(dir, &self.files())
    }
}

fn write_files(dir: &Path, files: &[(&str, &str)]) -> Result<Vec<PathBuf>> {
    let mut written: Vec<PathBuf> = Vec::with_capacity(files.len());
    let mut created: Vec<PathBuf> = Vec::new();
    for (name, content) in files {
        let path: PathBuf = dir.join(name);
        if let Err(err) = write_file(&path, content, &mut created) {
            remove_written(&written, &created);
            return Err(err);
        }
        info!("{} has been generated.", path.display());
        written.push(path);
    }
    Ok(written)
}

fn write_file(path: &Path, content: &str, created: &mut Vec<PathBuf>) -> Result<()> {
    let io_err = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        let missing: Vec<PathBuf> = parent
            .ancestors()
            .take_while(|dir| !dir.as_os_str().is_empty() && !dir.exists())
            .map(Path::to_path_buf)
            .collect();
        fs::create_dir_all(parent).map_err(io_err)?;
        created.extend(missing.into_iter().rev());
    }
    fs::write(path, content).map_err(io_err)
}

fn remove_written(files: &[PathBuf], dirs: &[PathBuf]) {
    for path in files {
        if let Err(err) = fs::remove_file(path) {
            warn!(path = %path.display(), %err, "Could not remove partial artifact");
        }
    }
    // Deepest first, so each directory is empty when it is removed.
    for dir in dirs.iter().rev() {
        if let Err(err) = fs::remove_dir(dir) {
            warn!(path = %dir.display(), %err, "Could not remove created directory");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_write_removes_created_entries() {
        let dir = tempfile::tempdir().unwrap();
        let out: PathBuf = dir.path().join("out");
        // The second entry collides with the directory created for the first.
        let err = write_files(&out, &[("src/a.h", "a"), ("src", "b")]).unwrap_err();
        assert!(matches!(err, Error::Io { ref path, .. } if path == &out.join("src")));
        assert!(!out.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn failed_write_keeps_existing_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("keep.txt"), "keep").unwrap();
        assert!(write_files(dir.path(), &[("x/y.txt", "y"), ("x", "z")]).is_err());
        assert!(!dir.path().join("x").exists());
        assert!(dir.path().join("keep.txt").is_file());
    }
}
