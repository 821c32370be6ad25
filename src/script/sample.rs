//! Built-in demo script.
//!
//! Stands in for the external script generator when no generated script is at hand: three edit
//! steps building a small React button component and a page that uses it.

use crate::script::model::{ActionKind, CodeAction, Script};

const BUTTON_V1: &str = r#"import React from 'react';

interface ButtonProps {
  label: string;
  onClick: () => void;
}

export const Button: React.FC<ButtonProps> = ({ label, onClick }) => {
  return (
    <button
      onClick={onClick}
      className="px-4 py-2 bg-blue-500 text-white rounded hover:bg-blue-600"
    >
      {label}
    </button>
  );
};"#;

const BUTTON_V2: &str = r#"import React, { useState } from 'react';

interface ButtonProps {
  label: string;
  onClick: () => void;
}

export const Button: React.FC<ButtonProps> = ({ label, onClick }) => {
  const [isLoading, setIsLoading] = useState(false);

  const handleClick = async () => {
    setIsLoading(true);
    await onClick();
    setIsLoading(false);
  };

  return (
    <button
      onClick={handleClick}
      disabled={isLoading}
      className="px-4 py-2 bg-blue-500 text-white rounded hover:bg-blue-600 disabled:opacity-50"
    >
      {isLoading ? 'Loading...' : label}
    </button>
  );
};"#;

const PAGE: &str = r#"import { Button } from '@/components/Button';

export default function Home() {
  const handleClick = () => {
    console.log('Button clicked!');
  };

  return (
    <div className="container mx-auto p-8">
      <h1 className="text-3xl font-bold mb-4">Welcome</h1>
      <Button label="Click Me" onClick={handleClick} />
    </div>
  );
}"#;

/// Demo script for `title` / `topic`: 8 s, 10 s and 7 s of typing.
pub fn sample_script(title: &str, topic: &str) -> Script {
    let narration = format!(
        "Welcome to this tutorial on {title}. Today we'll be exploring {topic}.\n\n\
         Let's start by creating a new React component. First, we'll set up the basic structure \
         with imports and the component function.\n\n\
         Next, we'll add some state management using React hooks. This will allow us to track \
         user interactions and update the UI dynamically.\n\n\
         Finally, we'll wire the component into a page.\n\n\
         That's it! You now have a fully functional React component."
    );

    Script {
        narration,
        code_actions: vec![
            CodeAction::new("src/components/Button.tsx", ActionKind::Create, BUTTON_V1, 8.0),
            CodeAction::new("src/components/Button.tsx", ActionKind::Update, BUTTON_V2, 10.0),
            CodeAction::new("src/app/page.tsx", ActionKind::Create, PAGE, 7.0),
        ],
    }
}
