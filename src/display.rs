use std::fmt::Write;

use crate::noderef::NodeRef;

pub struct TreeDisplay;

impl TreeDisplay {
    pub fn format<D>(node: &NodeRef<D>, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    where
        D: std::fmt::Display,
    {
        f.write_str("\n")?;

        let mut iter = node.clone().into_iter().peekable();

        let mut root_children = false;

        let column_width = 2;

        loop {
            if let Some(node) = iter.next() {
                // Peek at the next node to see if there are siblings
                let has_siblings = if let Some(next_node) = iter.peek() {
                    node.depth() == next_node.depth()
                } else {
                    false
                };

                let has_children = node.node().num_children() > 0;

                if node.depth() == 0 {
                    root_children = has_children
                }

                // The position of the first character of the payload from the previous row
                let pos = node.depth() * column_width;

                if node.depth() == 0 {
                    if has_children || has_siblings {
                        f.write_char('┏')?;
                    } else {
                        f.write_char('━')?;
                    }
                } else {
                    for i in 0..pos {
                        if i % column_width == 0 {
                            f.write_char('┃')?;
                        } else {
                            f.write_char(' ')?;
                        }
                    }

                    if has_children || has_siblings {
                        f.write_char('┣')?;
                    } else {
                        f.write_char('┗')?;
                    }
                }

                {
                    let inner = node.node();
                    match inner.data() {
                        Some(data) => write!(f, "{}", data)?,
                        None => write!(f, "{}", inner.id())?,
                    }
                }

                f.write_char('\n')?;
            } else {
                // Finished node iteration
                if root_children {
                    f.write_str("┗")?;
                }
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{NodeMapping, Tree};

    #[test]
    fn renders_one_row_per_node() {
        let mapping = NodeMapping::new("r")
            .with_data("root".to_string())
            .with_child(NodeMapping::new("a").with_data("left".to_string()))
            .with_child(NodeMapping::new("b").with_data("right".to_string()));

        let tree = Tree::load(mapping).unwrap();
        let rendered = format!("{}", tree.root());

        assert!(rendered.contains("root"));
        assert!(rendered.contains("left"));
        assert!(rendered.contains("right"));
        // Leading newline plus one row per node
        assert_eq!(rendered.lines().filter(|l| !l.is_empty()).count(), 4);
    }
}
