use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde_json;
use uuid::Uuid;

use crate::model::task::Task;
use crate::repository::traits::TaskRepository;

const DEFAULT_DIR_NAME: &str = ".taskboard";
const DEFAULT_FILE_NAME: &str = "tasks.json";

/// Whole-file JSON store: every mutation reads the array, changes it, and
/// rewrites the file. There is no locking; concurrent writers race and the
/// last one wins.
#[derive(Clone, Debug)]
pub struct FileTaskRepository {
    file_path: PathBuf,
}

impl FileTaskRepository {
    pub fn new(file_path: impl Into<PathBuf>) -> Result<Self> {
        let file_path = file_path.into();
        if let Some(dir) = file_path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("Could not create directory {}", dir.display()))?;
            }
        }

        // Initialize an absent file to an empty array
        if !file_path.exists() {
            let mut writer = BufWriter::new(File::create(&file_path)?);
            serde_json::to_writer_pretty(&mut writer, &Vec::<Task>::new())?;
            writer.flush()?;
        }

        Ok(FileTaskRepository { file_path })
    }

    /// `~/.taskboard/tasks.json`
    pub fn default_path() -> Result<PathBuf> {
        let home_dir =
            dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
        Ok(home_dir.join(DEFAULT_DIR_NAME).join(DEFAULT_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn read_tasks(&self) -> Result<Vec<Task>> {
        let file = File::open(&self.file_path)
            .with_context(|| format!("Could not open {}", self.file_path.display()))?;
        let reader = BufReader::new(file);
        let tasks = serde_json::from_reader(reader)
            .with_context(|| format!("Could not parse {}", self.file_path.display()))?;
        Ok(tasks)
    }

    fn write_tasks(&self, tasks: &[Task]) -> Result<()> {
        let file = File::create(&self.file_path)
            .with_context(|| format!("Could not write {}", self.file_path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, tasks)?;
        writer.flush()?;
        Ok(())
    }
}

impl TaskRepository for FileTaskRepository {
    fn list(&self) -> Result<Vec<Task>> {
        self.read_tasks()
    }

    fn get(&self, id: &Uuid) -> Result<Option<Task>> {
        let tasks = self.read_tasks()?;
        Ok(tasks.into_iter().find(|t| t.id == *id))
    }

    fn create(&self, task: Task) -> Result<Task> {
        let mut tasks = self.read_tasks()?;
        tasks.push(task.clone());
        self.write_tasks(&tasks)?;
        Ok(task)
    }

    fn update(&self, task: &Task) -> Result<Option<Task>> {
        let mut tasks = self.read_tasks()?;
        if let Some(pos) = tasks.iter().position(|t| t.id == task.id) {
            tasks[pos] = task.clone();
            self.write_tasks(&tasks)?;
            Ok(Some(task.clone()))
        } else {
            Ok(None)
        }
    }

    fn delete(&self, id: &Uuid) -> Result<Option<Task>> {
        let mut tasks = self.read_tasks()?;
        let Some(pos) = tasks.iter().position(|t| t.id == *id) else {
            return Ok(None);
        };

        let removed = tasks.remove(pos);
        self.write_tasks(&tasks)?;
        Ok(Some(removed))
    }
}
