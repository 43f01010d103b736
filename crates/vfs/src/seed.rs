use crate::tree::FileTree;
use crate::types::{FileNode, NodeKind};

const README: &str = "Welcome to CyberAcme OS v3.4.0\n\nThis is a secure terminal system for managing and accessing CyberAcme resources. Please use the \"help\" command for more information.\n\nCyberAcme - Tomorrow's Tech Today";

const USER_MANUAL: &str = "CYBERACME OS USER MANUAL\n\n1. Basic Commands:\n   - ls: List files and directories\n   - cd: Change directory\n   - cat: View file contents\n   - clear: Clear terminal screen\n   - help: Display help information\n\n2. Navigation:\n   Use \"cd\" to navigate directories. Example: cd documents\n   Use \"ls\" to see available files and folders.\n\n3. Running Programs:\n   Use \"cat\" command on program files to run them.\n   Example: cat tetris";

const ACCESS_LOG: &str = "ACCESS LOG - RESTRICTED\n\n2025-04-22 08:15:23 - Admin login successful\n2025-04-22 09:30:12 - System backup initiated\n2025-04-23 14:22:56 - Security scan completed\n2025-04-24 10:11:32 - System update applied";

const SYSTEM_INFO: &str = "SYSTEM INFORMATION\n\nOS Version: CyberAcme OS v3.4.0\nKernel: CyberKernel 5.2.3\nCPU: Quantum Core i9-X 5.2GHz\nRAM: 32GB Quantum Memory\nStorage: 2TB Quantum SSD, 16TB Holographic Array\nNetwork: Quantum Entanglement Module v4.2";

const PROJECT_OMEGA: &str = "PROJECT OMEGA - TOP SECRET\n\nProject Omega represents our most ambitious initiative to date. The development of a completely autonomous AI security system with predictive capabilities beyond anything currently in existence.\n\nCurrent progress: 78%\nExpected completion: Q3 2025\n\nSECURITY LEVEL: ALPHA - AUTHORIZED PERSONNEL ONLY";

fn scene(name: &str, payload: &str) -> FileNode {
    FileNode::launchable(name, NodeKind::Scene, Some(payload))
}

/// The structure every fresh installation starts from.
pub fn initial_tree() -> FileTree {
    FileTree::from_nodes(vec![FileNode::directory(
        "home",
        vec![
            FileNode::directory(
                "documents",
                vec![
                    FileNode::file("readme.txt", README),
                    FileNode::file("user_manual.txt", USER_MANUAL),
                ],
            ),
            FileNode::directory(
                "programs",
                vec![
                    FileNode::directory(
                        "games",
                        vec![
                            scene("tetris", "TETRIS_GAME_COMPONENT"),
                            scene("snake", "SNAKE_GAME_COMPONENT"),
                        ],
                    ),
                    FileNode::directory(
                        "utilities",
                        vec![
                            scene("calculator", "CALCULATOR_COMPONENT"),
                            scene("clock", "CLOCK_COMPONENT"),
                        ],
                    ),
                    FileNode::directory(
                        "browser",
                        vec![scene("cyberacme_browser", "BROWSER_COMPONENT")],
                    ),
                ],
            ),
            FileNode::directory(
                "system",
                vec![
                    FileNode::directory(
                        "security",
                        vec![FileNode::file("access_log.txt", ACCESS_LOG).restricted()],
                    )
                    .restricted(),
                    FileNode::directory(
                        "config",
                        vec![FileNode::file("system_info.txt", SYSTEM_INFO)],
                    ),
                ],
            ),
            scene("welcome", "WELCOME_SCREEN_COMPONENT"),
            FileNode::directory(
                "restricted",
                vec![
                    scene("admin_panel", "ADMIN_PANEL_COMPONENT").restricted(),
                    FileNode::directory(
                        "secret_files",
                        vec![FileNode::file("project_omega.txt", PROJECT_OMEGA).restricted()],
                    )
                    .restricted(),
                ],
            )
            .restricted(),
        ],
    )])
}
