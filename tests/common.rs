use std::{fs, path::Path};

use assert_cmd::Command;

#[allow(dead_code)]
pub fn tinygit() -> Command {
    let mut cmd = Command::cargo_bin("tinygit").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

// Build, by hand, the tree that `tinygit init` should produce in `path`.
#[allow(dead_code)]
pub fn expected_layout(path: &Path) {
    let control_dir = path.join(".git");

    for dir in &["branches", "objects", "refs/heads", "refs/tags"] {
        fs::create_dir_all(control_dir.join(dir)).unwrap();
    }

    let config_txt = "[core]\n\trepositoryformatversion = 0\n\tfilemode = false\n\tbare = false\n";
    fs::write(control_dir.join("config"), config_txt).unwrap();

    let desc_txt = "Unnamed repository; edit this file 'description' to name the repository.\n";
    fs::write(control_dir.join("description"), desc_txt).unwrap();

    let head_txt = "ref: refs/heads/master\n";
    fs::write(control_dir.join("HEAD"), head_txt).unwrap();
}
