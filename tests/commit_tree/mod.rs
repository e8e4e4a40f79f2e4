mod commit_tree_does_not_move_head;
mod commit_tree_requires_author_identity;
