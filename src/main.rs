mod cli;

use std::error::Error;
use std::path::{Path, PathBuf};

use mklist::config::Config;
use mklist::exec;
use mklist::filelist::FileList;
use mklist::launch;
use mklist::mime;
use mklist::registry::ApplicationDescriptor;
use mklist::resolver::Resolver;

use cli::Command;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match cli::parse_args() {
        Command::Mime { file } => cmd_mime(&file),
        Command::Apps { file } => cmd_apps(&file),
        Command::Open { with, wait, files } => cmd_open(with, wait, files),
        Command::List {
            import,
            export,
            files,
        } => cmd_list(import, export, files),
    }
}

fn cmd_mime(file: &Path) -> Result<(), Box<dyn Error>> {
    match mime::detect(file) {
        Some(mime) => {
            println!("{}", mime);
            Ok(())
        }
        None => Err(format!("cannot determine MIME type of {}", file.display()).into()),
    }
}

fn cmd_apps(file: &Path) -> Result<(), Box<dyn Error>> {
    let Some(mime) = mime::detect(file) else {
        return Err(format!("cannot determine MIME type of {}", file.display()).into());
    };

    let config = Config::load();
    let resolver = Resolver::new(config.descriptor_dirs, config.overrides_path);
    let apps = resolver.apps_for(&mime);
    if apps.is_empty() {
        eprintln!("mklist: no applications for {}", mime);
        return Ok(());
    }
    for app in apps {
        println!("{}\t{}", app.id, app.display_name);
    }
    Ok(())
}

fn cmd_open(with: Option<String>, wait: bool, files: Vec<PathBuf>) -> Result<(), Box<dyn Error>> {
    let config = Config::load();
    let resolver = Resolver::new(config.descriptor_dirs, config.overrides_path);
    let snapshot = resolver.snapshot();

    // Group files by the application that will open them, so each
    // application is launched once with all of its files.
    let mut groups: Vec<(ApplicationDescriptor, Vec<PathBuf>)> = Vec::new();
    for file in files {
        let file = std::path::absolute(&file)?;
        let descriptor = match &with {
            Some(id) => snapshot
                .registry()
                .get(id)
                .cloned()
                .ok_or_else(|| format!("no application with id `{}`", id))?,
            None => {
                let Some(mime) = mime::detect(&file) else {
                    eprintln!("mklist: cannot determine MIME type of {}", file.display());
                    continue;
                };
                let apps = resolver.apps_for(&mime);
                match apps.into_iter().next() {
                    Some(app) => app,
                    None => {
                        eprintln!("mklist: no application for {} ({})", file.display(), mime);
                        continue;
                    }
                }
            }
        };
        match groups.iter_mut().find(|(d, _)| d.id == descriptor.id) {
            Some((_, paths)) => paths.push(file),
            None => groups.push((descriptor, vec![file])),
        }
    }

    if wait {
        open_and_wait(&groups)
    } else {
        for (descriptor, paths) in &groups {
            let argv = exec::expand(&descriptor.exec_template, paths)?;
            let handle = launch::launch(&argv)?;
            println!("{} (pid {})", descriptor.display_name, handle.pid());
        }
        Ok(())
    }
}

fn open_and_wait(groups: &[(ApplicationDescriptor, Vec<PathBuf>)]) -> Result<(), Box<dyn Error>> {
    let rt = tokio::runtime::Builder::new_current_thread().build()?;

    rt.block_on(async {
        let mut waiters = Vec::new();
        for (descriptor, paths) in groups {
            let argv = exec::expand(&descriptor.exec_template, paths)?;
            let (tx, rx) = tokio::sync::oneshot::channel();
            launch::launch_observed(&argv, move |status| {
                let _ = tx.send(status);
            })?;
            waiters.push((descriptor.display_name.clone(), rx));
        }

        for (name, rx) in waiters {
            match rx.await {
                Ok(Ok(status)) if status.success() => println!("{} exited", name),
                Ok(Ok(status)) => eprintln!("mklist: {} exited with {}", name, status),
                Ok(Err(e)) => eprintln!("mklist: wait failed for {}: {}", name, e),
                Err(_) => {}
            }
        }
        Ok(())
    })
}

fn cmd_list(
    import: Option<PathBuf>,
    export: Option<PathBuf>,
    files: Vec<PathBuf>,
) -> Result<(), Box<dyn Error>> {
    let mut list = FileList::new();
    if let Some(source) = import {
        list.import(&source)?;
    }
    for file in files {
        list.push(file);
    }

    match export {
        Some(dest) => list.export(&dest)?,
        None => {
            for path in list.iter() {
                println!("{}", path.display());
            }
        }
    }
    Ok(())
}
