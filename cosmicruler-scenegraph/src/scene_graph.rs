use std::collections::HashMap;

use crate::error::RulerSceneGraphError;
use crate::marks::{group::SceneGroup, mark::SceneMark};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneGraph {
    pub marks: Vec<SceneMark>,
    pub width: f32,
    pub height: f32,
    pub origin: [f32; 2],
}

impl SceneGraph {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            marks: vec![],
            width,
            height,
            origin: [0.0, 0.0],
        }
    }

    pub fn children(&self) -> &[SceneMark] {
        &self.marks
    }

    pub fn add_mark(&mut self, mark: impl Into<SceneMark>) {
        self.marks.push(mark.into());
    }

    /// Appends an empty top-level group and returns its path
    pub fn add_group(&mut self, name: impl Into<String>) -> Vec<usize> {
        self.marks.push(SceneGroup::new(name).into());
        vec![self.marks.len() - 1]
    }

    pub fn get_mark(&self, mark_path: &[usize]) -> Option<&SceneMark> {
        // empty path is the root, which is not a mark
        let (first, rest) = mark_path.split_first()?;
        let mut child = self.marks.get(*first)?;
        for index in rest {
            child = child.children().get(*index)?;
        }
        Some(child)
    }

    pub fn get_group(&self, group_path: &[usize]) -> Option<&SceneGroup> {
        match self.get_mark(group_path)? {
            SceneMark::Group(group) => Some(group),
            _ => None,
        }
    }

    pub fn get_group_mut(
        &mut self,
        group_path: &[usize],
    ) -> Result<&mut SceneGroup, RulerSceneGraphError> {
        let missing = || RulerSceneGraphError::MissingGroup(group_path.to_vec());
        let (first, rest) = group_path.split_first().ok_or_else(missing)?;
        let mut group = match self.marks.get_mut(*first) {
            Some(SceneMark::Group(group)) => group,
            _ => return Err(missing()),
        };
        for index in rest {
            group = match group.marks.get_mut(*index) {
                Some(SceneMark::Group(child)) => child,
                _ => return Err(missing()),
            };
        }
        Ok(group)
    }

    /// Returns all of the group paths in the scene graph
    pub fn group_paths(&self) -> Vec<Vec<usize>> {
        let mut paths = vec![];
        for (index, mark) in self.marks.iter().enumerate() {
            let SceneMark::Group(group) = mark else {
                continue;
            };
            paths.push(vec![index]);
            for sub_path in group.group_paths() {
                let mut path = vec![index];
                path.extend(sub_path);
                paths.push(path);
            }
        }
        paths
    }

    /// Returns mapping from the names of each named group to their path
    pub fn group_names(&self) -> HashMap<String, Vec<usize>> {
        let mut names = HashMap::new();
        for path in self.group_paths() {
            let Some(group) = self.get_group(&path) else {
                continue;
            };
            names.insert(group.name.clone(), path);
        }
        names
    }
}
