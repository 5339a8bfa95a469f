use crate::marks::mark::SceneMark;
use crate::marks::rect::SceneRectMark;
use crate::marks::rule::SceneRuleMark;
use crate::marks::text::SceneTextMark;
use serde::{Deserialize, Serialize};

/// A named, translated container of marks; written to SVG as `<g id=...>`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneGroup {
    pub name: String,
    pub origin: [f32; 2],
    pub marks: Vec<SceneMark>,
}

impl SceneGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn add_rule(&mut self, mark: SceneRuleMark) -> &mut Self {
        self.marks.push(mark.into());
        self
    }

    pub fn add_text(&mut self, mark: SceneTextMark) -> &mut Self {
        self.marks.push(mark.into());
        self
    }

    pub fn add_rect(&mut self, mark: SceneRectMark) -> &mut Self {
        self.marks.push(mark.into());
        self
    }

    /// Appends an empty child group and returns it for filling
    pub fn add_group(&mut self, name: impl Into<String>) -> &mut SceneGroup {
        self.marks.push(SceneGroup::new(name).into());
        match self.marks.last_mut() {
            Some(SceneMark::Group(group)) => group,
            _ => unreachable!("a group was just pushed"),
        }
    }

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

    /// Child group by name, searching direct children only
    pub fn child_group(&self, name: &str) -> Option<&SceneGroup> {
        self.marks.iter().find_map(|mark| match mark {
            SceneMark::Group(group) if group.name == name => Some(group),
            _ => None,
        })
    }
}

impl From<SceneGroup> for SceneMark {
    fn from(mark: SceneGroup) -> Self {
        SceneMark::Group(mark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_group_paths() {
        let mut root = SceneGroup::new("root");
        root.add_rule(SceneRuleMark::default());
        root.add_group("a").add_group("b");
        root.add_group("c");

        assert_eq!(root.group_paths(), vec![vec![1], vec![1, 0], vec![2]]);
        assert!(root.child_group("a").unwrap().child_group("b").is_some());
        assert!(root.child_group("b").is_none());
    }
}
