//! Plot script written next to `results.csv`.

/// Python script rendering speedup, efficiency, wall time and best-speedup
/// panels from `results.csv` (needs pandas and matplotlib).
pub const PLOT_SCRIPT: &str = r#"import pandas as pd
import matplotlib.pyplot as plt

df = pd.read_csv('results.csv')

fig, ((ax1, ax2), (ax3, ax4)) = plt.subplots(2, 2, figsize=(15, 12))
fig.suptitle('Parallel SIR Monte Carlo Benchmark', fontsize=16)

ax1.plot(df['Threads'], df['ExecutorSpeedup'], 'b-o', label='Partitioned pool', linewidth=2)
ax1.plot(df['Threads'], df['ForkJoinSpeedup'], 'r-s', label='Recursive split', linewidth=2)
ax1.plot(df['Threads'], df['Threads'], 'k--', alpha=0.5, label='Linear speedup')
ax1.set_xlabel('Threads')
ax1.set_ylabel('Speedup')
ax1.set_title('Speedup')
ax1.legend()
ax1.grid(True, alpha=0.3)

ax2.plot(df['Threads'], df['ExecutorEfficiency'], 'b-o', label='Partitioned pool', linewidth=2)
ax2.plot(df['Threads'], df['ForkJoinEfficiency'], 'r-s', label='Recursive split', linewidth=2)
ax2.axhline(y=100, color='k', linestyle='--', alpha=0.5, label='100%')
ax2.set_xlabel('Threads')
ax2.set_ylabel('Efficiency (%)')
ax2.set_title('Efficiency')
ax2.legend()
ax2.grid(True, alpha=0.3)

ax3.plot(df['Threads'], df['ExecutorTime'], 'b-o', label='Partitioned pool', linewidth=2)
ax3.plot(df['Threads'], df['ForkJoinTime'], 'r-s', label='Recursive split', linewidth=2)
ax3.set_xlabel('Threads')
ax3.set_ylabel('Wall time (ms)')
ax3.set_title('Wall time')
ax3.legend()
ax3.grid(True, alpha=0.3)

best_exec = df.loc[df['ExecutorSpeedup'].idxmax()]
best_fj = df.loc[df['ForkJoinSpeedup'].idxmax()]
labels = ['Partitioned pool\n(best)', 'Recursive split\n(best)']
speedups = [best_exec['ExecutorSpeedup'], best_fj['ForkJoinSpeedup']]
threads = [best_exec['Threads'], best_fj['Threads']]

bars = ax4.bar(labels, speedups, color=['blue', 'red'], alpha=0.7)
ax4.set_ylabel('Speedup')
ax4.set_title('Best speedup')
ax4.grid(True, alpha=0.3)
for bar, speedup, thread in zip(bars, speedups, threads):
    ax4.text(bar.get_x() + bar.get_width() / 2.0, bar.get_height(),
             f'{speedup:.1f}x\n({int(thread)} threads)', ha='center', va='bottom')

plt.tight_layout()
plt.savefig('performance_analysis.png', dpi=300, bbox_inches='tight')

print(f"Best partitioned pool: {best_exec['ExecutorSpeedup']:.2f}x with {int(best_exec['Threads'])} threads")
print(f"Best recursive split: {best_fj['ForkJoinSpeedup']:.2f}x with {int(best_fj['Threads'])} threads")
print("Saved performance_analysis.png")
"#;
