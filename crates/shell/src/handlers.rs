use crate::registry::PayloadRegistry;
use crate::response::{Action, CommandResponse};
use cyac_vfs::{path, FileNode, FileSystem, NodeKind};

const HOME: &str = "/home";

fn entry(node: &FileNode) -> String {
    let suffix = if node.is_directory() { "/" } else { "" };
    if node.is_restricted() {
        return format!("[rst]{}{} (restricted access)[/rst]", node.name(), suffix);
    }
    match node.kind() {
        NodeKind::Directory => format!("[dir]{}/[/dir]", node.name()),
        NodeKind::Scene | NodeKind::Subscene => format!("[exe]{}[/exe]", node.name()),
        NodeKind::File | NodeKind::Program => format!("[file]{}[/file]", node.name()),
    }
}

fn group(label: &str, nodes: &[&FileNode]) -> Option<String> {
    if nodes.is_empty() {
        return None;
    }
    let entries: Vec<String> = nodes.iter().map(|node| entry(node)).collect();
    Some(format!("{} {}", label, entries.join(" ")))
}

/// `ls [path]`
pub fn ls(args: &[String], fs: &FileSystem) -> CommandResponse {
    let target = match args.first() {
        Some(raw) => path::resolve(raw, fs.current_path()),
        None => fs.current_path().to_string(),
    };

    let contents = fs.list_directory(&target);
    if contents.is_empty() {
        return CommandResponse::line("No files or directories found");
    }

    let of_kind = |kinds: &[NodeKind]| -> Vec<&FileNode> {
        contents
            .iter()
            .filter(|node| kinds.contains(&node.kind()))
            .collect()
    };

    let output = [
        group("[g]Directories:[/g]", &of_kind(&[NodeKind::Directory])),
        group("[c]Scenes:[/c]", &of_kind(&[NodeKind::Scene])),
        group("[b]Sub-Scenes:[/b]", &of_kind(&[NodeKind::Subscene])),
        group("[y]Files:[/y]", &of_kind(&[NodeKind::File, NodeKind::Program])),
    ]
    .into_iter()
    .flatten()
    .collect();

    CommandResponse::ok(output)
}

/// `cd [path]`. No argument goes home.
pub fn cd(args: &[String], fs: &mut FileSystem) -> CommandResponse {
    let target = match args.first() {
        Some(raw) => path::resolve(raw, fs.current_path()),
        None => HOME.to_string(),
    };

    if fs.navigate_to(&target) {
        CommandResponse::line(format!("Changed directory to {}", target))
            .with_action(Action::Navigate(target))
    } else {
        CommandResponse::error(format!(
            "ERROR: Cannot change to {} - directory not found or access denied",
            target
        ))
    }
}

/// `cat <name>`: print a file or launch a scene.
///
/// The restriction check runs before the kind check, so a restricted
/// directory reports access denied rather than a usage hint.
pub fn cat(args: &[String], fs: &FileSystem, registry: &PayloadRegistry) -> CommandResponse {
    let Some(name) = args.first() else {
        return CommandResponse::error("ERROR: Missing filename argument");
    };

    let target = path::join(fs.current_path(), name);
    let Some(node) = fs.get_node_at_path(&target) else {
        return CommandResponse::error(format!("ERROR: File not found: {}", name));
    };

    if node.is_restricted() && !fs.is_logged_in() {
        return CommandResponse::error(
            "ACCESS DENIED: You need to be logged in to access this item.",
        );
    }

    match node.kind() {
        NodeKind::Directory => CommandResponse::error(format!(
            "ERROR: {} is a directory. Use 'ls {}' to view its contents.",
            name, name
        )),
        NodeKind::File => match node.content() {
            Some(content) if !content.is_empty() => {
                let mut output = vec![format!("File: {}", name), "---".to_string()];
                output.extend(content.split('\n').map(str::to_string));
                CommandResponse::ok(output)
            }
            _ => CommandResponse::line(format!("File: {} (empty)", name)),
        },
        NodeKind::Scene | NodeKind::Subscene | NodeKind::Program => {
            let unit = node.payload().and_then(|id| registry.resolve(id));
            let Some(unit) = unit else {
                tracing::debug!("No UI unit bound to {} ({:?})", target, node.payload());
                return CommandResponse::error(format!(
                    "ERROR: Unable to load {} - component not found",
                    name
                ));
            };

            CommandResponse::line(format!("OPENING: {}", name)).with_action(Action::OpenWindow {
                id: format!("window-{}", name),
                title: name.to_string(),
                component: unit.component.clone(),
                props: unit.props.clone(),
            })
        }
    }
}
