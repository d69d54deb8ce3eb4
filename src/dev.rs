pub struct TestProps {
    path: std::path::PathBuf,
    pub tmpdir: temp_dir::TempDir,
}

impl TestProps {
    /// Write `json` to a props file inside a fresh temporary directory
    pub fn new(json: &str) -> Self {
        let tmpdir = temp_dir::TempDir::with_prefix("awscredstep-dev").unwrap();
        let path = tmpdir.path().join("props.json");
        std::fs::write(&path, json).unwrap();
        Self { path, tmpdir }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}
