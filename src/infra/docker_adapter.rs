use crate::domain::{ComposeProject, ContainerEngine, EngineError, Network, UpOptions};
use anyhow::{Context, Result};
use std::ffi::OsString;
use std::process::{Command, ExitStatus, Stdio};
use tracing::debug;

pub const DEFAULT_ENGINE_BINARY: &str = "docker";

#[derive(Debug, Clone)]
pub struct DockerAdapter {
    binary: String,
}

impl DockerAdapter {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Program and leading arguments for a compose invocation on `project`
    fn compose_command(&self, project: &ComposeProject) -> (String, Vec<OsString>) {
        let (program, mut args) = if project.standalone {
            ("docker-compose".to_string(), Vec::new())
        } else {
            (self.binary.clone(), vec![OsString::from("compose")])
        };

        args.push("-f".into());
        args.push(project.file.as_os_str().to_os_string());

        if let Some(name) = &project.project_name {
            args.push("-p".into());
            args.push(name.into());
        }

        (program, args)
    }

    /// Version query for the program compose commands on `project` will use
    fn compose_version_command(&self, project: &ComposeProject) -> (String, Vec<&'static str>) {
        if project.standalone {
            ("docker-compose".to_string(), vec!["--version"])
        } else {
            (self.binary.clone(), vec!["compose", "version"])
        }
    }

    fn run(&self, program: &str, args: Vec<OsString>, context: &str) -> Result<()> {
        let rendered = render(program, args.as_slice());
        debug!("Executando {rendered}");

        let status = Command::new(program)
            .args(&args)
            .status()
            .with_context(|| format!("{context} (executando {program})"))?;

        ensure_success(status, rendered)
    }

    fn engine<I, S>(&self, args: I, context: &str) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let args = args.into_iter().map(Into::into).collect();
        self.run(&self.binary, args, context)
    }

    /// Run an engine listing command, returning its stdout
    fn engine_output(&self, args: &[&str], context: &str) -> Result<String> {
        let rendered = render(&self.binary, args);
        debug!("Executando {rendered}");

        let output = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .with_context(|| format!("{context} (executando {})", self.binary))?;

        ensure_success(output.status, rendered)?;

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn engine_with_ids(&self, verb: &[&str], ids: &[String], context: &str) -> Result<()> {
        let args = verb
            .iter()
            .map(OsString::from)
            .chain(ids.iter().map(OsString::from));
        self.engine(args, context)
    }
}

impl Default for DockerAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_ENGINE_BINARY)
    }
}

impl ContainerEngine for DockerAdapter {
    fn compose_up(&self, project: &ComposeProject, options: &UpOptions) -> Result<()> {
        let (program, mut args) = self.compose_command(project);
        args.extend(up_flags(options).into_iter().map(OsString::from));

        self.run(
            &program,
            args,
            &format!("subindo serviços de {:?}", project.file),
        )
    }

    fn compose_down(&self, project: &ComposeProject) -> Result<()> {
        let (program, mut args) = self.compose_command(project);
        args.push("down".into());

        self.run(
            &program,
            args,
            &format!("derrubando serviços de {:?}", project.file),
        )
    }

    fn list_containers(&self) -> Result<Vec<String>> {
        let out = self.engine_output(&["ps", "-qa"], "listando containers")?;
        Ok(parse_ids(&out))
    }

    fn stop_containers(&self, ids: &[String]) -> Result<()> {
        self.engine_with_ids(&["stop"], ids, "parando containers")
    }

    fn remove_containers(&self, ids: &[String]) -> Result<()> {
        self.engine_with_ids(&["rm"], ids, "removendo containers")
    }

    fn list_images(&self) -> Result<Vec<String>> {
        let out = self.engine_output(&["images", "-qa"], "listando imagens")?;
        Ok(parse_ids(&out))
    }

    fn remove_images(&self, ids: &[String]) -> Result<()> {
        self.engine_with_ids(&["rmi", "-f"], ids, "removendo imagens")
    }

    fn list_volumes(&self) -> Result<Vec<String>> {
        let out = self.engine_output(&["volume", "ls", "-q"], "listando volumes")?;
        Ok(parse_ids(&out))
    }

    fn remove_volumes(&self, names: &[String]) -> Result<()> {
        self.engine_with_ids(&["volume", "rm"], names, "removendo volumes")
    }

    fn list_networks(&self) -> Result<Vec<Network>> {
        let out = self.engine_output(
            &["network", "ls", "--format", "{{.ID}}\t{{.Name}}"],
            "listando redes",
        )?;
        Ok(parse_networks(&out))
    }

    fn remove_networks(&self, ids: &[String]) -> Result<()> {
        self.engine_with_ids(&["network", "rm"], ids, "removendo redes")
    }

    fn is_available(&self) -> bool {
        responds(&self.binary, &["--version"])
    }

    fn is_compose_available(&self, project: &ComposeProject) -> bool {
        let (program, args) = self.compose_version_command(project);
        responds(&program, &args)
    }
}

fn responds(program: &str, args: &[&str]) -> bool {
    Command::new(program)
        .args(args)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

fn up_flags(options: &UpOptions) -> Vec<&'static str> {
    let mut flags = vec!["up"];
    if options.build {
        flags.push("--build");
    }
    if options.detached {
        flags.push("-d");
    }
    flags
}

fn parse_ids(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

fn parse_networks(output: &str) -> Vec<Network> {
    output
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() {
                return None;
            }
            match line.split_once(char::is_whitespace) {
                Some((id, name)) => Some(Network::new(id, name.trim())),
                None => Some(Network::new(line, "")),
            }
        })
        .collect()
}

fn render<S: AsRef<std::ffi::OsStr>>(program: &str, args: &[S]) -> String {
    let mut rendered = program.to_string();
    for arg in args {
        rendered.push(' ');
        rendered.push_str(&arg.as_ref().to_string_lossy());
    }
    rendered
}

fn ensure_success(status: ExitStatus, command: String) -> Result<()> {
    if status.success() {
        return Ok(());
    }

    Err(EngineError::CommandFailed {
        command,
        code: status.code(),
    }
    .into())
}
