use std::path::{Component, Path, PathBuf};

/// Absolute form of `path` for messages, without requiring it to exist.
///
/// Existing paths are canonicalized. Anything else is made absolute against
/// the current directory and lexically cleaned of `.` and `..` components.
pub fn best_effort_path_display(path: &Path) -> String {
    path.canonicalize()
        .or_else(|_| std::path::absolute(path).map(|absolute| lexically_normalize(&absolute)))
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}

fn lexically_normalize(path: &Path) -> PathBuf {
    path.components()
        .fold(Vec::<Component>::new(), |mut components, component| {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    if matches!(components.last(), Some(Component::Normal(_))) {
                        components.pop();
                    }
                }
                other => components.push(other),
            }
            components
        })
        .iter()
        .collect()
}

pub trait BestEffortPathExt {
    fn best_effort_path_display(&self) -> String;
}

impl BestEffortPathExt for Path {
    fn best_effort_path_display(&self) -> String {
        best_effort_path_display(self)
    }
}
