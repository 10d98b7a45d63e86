//! Charm-style CLI prompts using cliclack

use crate::config::InitializrConfig;
use crate::error::InitializrError;
use crate::initializr::generate::{self, GeneratedProject, OutputMode};
use crate::initializr::{InitializrClient, Metadata, MetadataSelect, MetadataValue, ProjectOptions};
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Input fields are capped at the service form's length
const INPUT_CHAR_LIMIT: usize = 80;

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Spring Initializr instance (falls back to the environment, then start.spring.io)
    pub url: Option<String>,

    /// Keep the generated project as a zip file
    pub zipped: bool,

    /// Read project options from a JSON or YAML file instead of prompting
    pub options_file: Option<PathBuf>,

    /// Directory in which the project is created
    pub directory: Option<PathBuf>,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Run the CLI with interactive prompts
pub async fn run(args: CreateArgs) -> Result<()> {
    cliclack::intro("Spring Initializr")?;

    let config = InitializrConfig::resolve(args.url.as_deref())?;
    cliclack::log::info(format!("Using {}", config.url))?;
    let client = InitializrClient::new(config);

    // Step 1: Load the form description
    let metadata = load_metadata(&client).await?;

    // Step 2: Collect options
    let options = match &args.options_file {
        Some(path) => options_from_file(path, &metadata)?,
        None => prompt_options(&metadata)?,
    };

    // Step 3: Resolve where to write
    let parent_dir = select_parent_directory(&args)?;

    // Step 4: Confirm
    if !args.yes {
        let confirm: bool = cliclack::confirm("Generate project?")
            .initial_value(true)
            .interact()?;
        if !confirm {
            anyhow::bail!("Setup cancelled.");
        }
    }

    // Step 5: Download and write
    let mode = if args.zipped {
        OutputMode::Zipped
    } else {
        OutputMode::Extract
    };
    let project = create_project(&client, &options, &parent_dir, mode).await?;

    // Step 6: Show next steps
    print_next_steps(&options, &project, mode)?;

    Ok(())
}

async fn load_metadata(client: &InitializrClient) -> Result<Metadata> {
    let spinner = cliclack::spinner();
    spinner.start("Loading project metadata...");

    match client.fetch_metadata().await {
        Ok(metadata) => {
            spinner.stop(format!(
                "Loaded metadata (Spring Boot {} by default)",
                metadata.boot_version.default
            ));
            Ok(metadata)
        }
        Err(e) => {
            spinner.stop("Failed to load metadata");
            Err(e)
        }
    }
}

fn options_from_file(path: &Path, metadata: &Metadata) -> Result<ProjectOptions> {
    let mut options = ProjectOptions::from_file(path)?;
    options.merge_defaults(metadata);
    debug!(?options, "options loaded from file");

    let incompatible = options.incompatible_dependencies(metadata);
    if !incompatible.is_empty() {
        return Err(InitializrError::IncompatibleDependencies {
            boot_version: options.boot_version,
            ids: incompatible,
        }
        .into());
    }

    cliclack::log::info(format!(
        "Options from {}: {} ({}), Spring Boot {}",
        path.display(),
        options.name,
        options.project_type,
        options.boot_version
    ))?;

    Ok(options)
}

/// Ask for every field of the service form, starting from its defaults
fn prompt_options(metadata: &Metadata) -> Result<ProjectOptions> {
    let mut options = ProjectOptions::from_metadata(metadata);

    options.project_type = select_value("Project", &metadata.project_type, &options.project_type)?;
    options.language = select_value("Language", &metadata.language, &options.language)?;
    options.boot_version =
        select_value("Spring Boot", &metadata.boot_version, &options.boot_version)?;

    options.group_id = input_value("Group", &options.group_id)?;
    options.artifact_id = input_value("Artifact", &options.artifact_id)?;

    // Name and package name follow the artifact unless edited
    let name_default = if options.artifact_id.is_empty() {
        options.name.clone()
    } else {
        options.artifact_id.clone()
    };
    options.name = input_value("Name", &name_default)?;
    options.version = input_value("Version", &options.version)?;
    options.description = input_value("Description", &options.description)?;

    let package_default = options
        .derived_package_name()
        .unwrap_or_else(|| options.package_name.clone());
    options.package_name = input_value("Package name", &package_default)?;

    options.packaging = select_value("Packaging", &metadata.packaging, &options.packaging)?;
    options.java_version = select_value("Java", &metadata.java_version, &options.java_version)?;

    options.dependencies = select_dependencies(metadata, &options.boot_version)?;

    Ok(options)
}

fn select_value(prompt: &str, element: &MetadataSelect, current: &str) -> Result<String> {
    if element.values.is_empty() {
        return Ok(current.to_string());
    }

    let mut select = cliclack::select(prompt);
    for value in &element.values {
        select = select.item(value.id.clone(), &value.name, item_hint(value));
    }
    if let Some(initial) = initial_choice(element, current) {
        select = select.initial_value(initial.to_string());
    }

    Ok(select.interact()?)
}

/// Keep the current choice when it is offered, otherwise start on the service default
fn initial_choice<'a>(element: &'a MetadataSelect, current: &str) -> Option<&'a str> {
    element
        .find(current)
        .or_else(|| element.default_index().map(|i| &element.values[i]))
        .map(|value| value.id.as_str())
}

fn item_hint(value: &MetadataValue) -> String {
    if value.has_description() {
        value.description.clone()
    } else if value.has_version_range() {
        format!("Spring Boot {}", value.version_range)
    } else {
        String::new()
    }
}

fn input_value(prompt: &str, default: &str) -> Result<String> {
    let mut input = cliclack::input(prompt).validate(|value: &String| {
        if value.chars().count() > INPUT_CHAR_LIMIT {
            Err(format!("Must be at most {} characters", INPUT_CHAR_LIMIT))
        } else {
            Ok(())
        }
    });
    if !default.is_empty() {
        input = input.placeholder(default).default_input(default);
    }

    let value: String = input.required(false).interact()?;
    Ok(value.trim().to_string())
}

/// Offer only the dependencies usable with the chosen Spring Boot version
fn select_dependencies(metadata: &Metadata, boot_version: &str) -> Result<Vec<String>> {
    let compatible = metadata.dependencies.compatible_values(boot_version);
    let total = metadata.dependencies.all_values().count();

    if total > compatible.len() {
        cliclack::log::remark(format!(
            "{} dependencies are not available for Spring Boot {}",
            total - compatible.len(),
            boot_version
        ))?;
    }

    if compatible.is_empty() {
        return Ok(Vec::new());
    }

    let mut multi = cliclack::multiselect("Dependencies");
    for value in &compatible {
        multi = multi.item(value.id.clone(), &value.name, item_hint(value));
    }

    let selected: Vec<String> = multi.required(false).interact()?;

    if !selected.is_empty() {
        let names: Vec<&str> = compatible
            .iter()
            .filter(|v| selected.contains(&v.id))
            .map(|v| v.name.as_str())
            .collect();
        cliclack::log::success(format!("Dependencies: {}", names.join(", ")))?;
    }

    Ok(selected)
}

fn select_parent_directory(args: &CreateArgs) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let path = match &args.directory {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => current_dir.join(dir),
        None => current_dir,
    };

    if !path.is_dir() {
        anyhow::bail!("Directory does not exist: {}", path.display());
    }

    Ok(path)
}

async fn create_project(
    client: &InitializrClient,
    options: &ProjectOptions,
    parent_dir: &Path,
    mode: OutputMode,
) -> Result<GeneratedProject> {
    let spinner = cliclack::spinner();
    spinner.start("Generating project...");

    let archive = match client.download_starter(options).await {
        Ok(archive) => archive,
        Err(e) => {
            spinner.stop("Failed to generate project");
            return Err(e);
        }
    };

    // Extraction is blocking file I/O
    let owned_options = options.clone();
    let target = parent_dir.to_path_buf();
    let written = tokio::task::spawn_blocking(move || {
        generate::write_project(&archive, &owned_options, &target, mode)
    })
    .await?;

    match written {
        Ok(project) => {
            match mode {
                OutputMode::Zipped => {
                    spinner.stop(format!("Saved {}", project.path.display()));
                }
                OutputMode::Extract => {
                    spinner.stop(format!(
                        "Created {} files in {}",
                        project.files.len(),
                        project.path.display()
                    ));
                }
            }
            Ok(project)
        }
        Err(e) => {
            spinner.stop("Failed to write project");
            Err(e)
        }
    }
}

/// Build command for the generated project type
fn run_command(project_type: &str) -> Option<&'static str> {
    if project_type.starts_with("gradle") {
        Some("./gradlew bootRun")
    } else if project_type.starts_with("maven") {
        Some("./mvnw spring-boot:run")
    } else {
        None
    }
}

fn next_steps(options: &ProjectOptions, project: &GeneratedProject, mode: OutputMode) -> Vec<String> {
    let mut steps = Vec::new();

    if mode == OutputMode::Zipped {
        steps.push(format!("unzip {}", project.path.display()));
        return steps;
    }

    let current = std::env::current_dir().ok();
    if current.as_deref() != Some(project.path.as_path()) {
        steps.push(format!("cd {}", project.path.display()));
    }
    if let Some(command) = run_command(&options.project_type) {
        steps.push(command.to_string());
    }
    steps.push("Open HELP.md to get started".to_string());

    steps
}

fn print_next_steps(
    options: &ProjectOptions,
    project: &GeneratedProject,
    mode: OutputMode,
) -> Result<()> {
    let steps = next_steps(options, project, mode);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro(format!("Spring project '{}' created. 🌱", options.name))?;

    Ok(())
}
